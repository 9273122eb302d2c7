//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for banners, colorized diffs, and serialized
//! dumps. By centralizing output logic here, we keep the command handlers
//! free of formatting details.

use std::io::Write;
use std::path::Path;

use difference::{Changeset, Difference};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Block;
use crate::cli::args::DumpFormat;
use crate::CMakeError;

/// Colors only when stdout is a terminal.
pub fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints the per-file header.
pub fn print_banner(path: &Path, number: usize, total: usize) {
    let mut stdout = StandardStream::stdout(color_choice());
    let rule = "-".repeat(24);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(stdout, "{}", rule);
    let _ = writeln!(stdout, "{} - {} of {}", path.display(), number, total);
    let _ = writeln!(stdout, "{}", rule);
    let _ = stdout.reset();
}

/// Prints a line diff from `original` to `cleaned`.
pub fn print_diff(original: &str, cleaned: &str) {
    let mut stdout = StandardStream::stdout(color_choice());
    let changeset = Changeset::new(original.trim_end(), cleaned.trim_end(), "\n");
    write_diff(&mut stdout, &changeset.diffs);
    let _ = stdout.reset();
}

/// Prints a parse tree in the requested format.
pub fn print_tree(path: &Path, tree: &Block, format: DumpFormat) -> Result<(), CMakeError> {
    match format {
        DumpFormat::Debug => {
            println!("{}:", path.display());
            println!("{tree:#?}");
        }
        DumpFormat::Json => print_json(tree)?,
        DumpFormat::Yaml => {
            let text = serde_yaml::to_string(tree)
                .map_err(|e| crate::err_msg!(Internal, "serializing tree: {}", e))?;
            print!("{}", text);
        }
    }
    Ok(())
}

/// Pretty-prints any serializable value as JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CMakeError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| crate::err_msg!(Internal, "serializing JSON: {}", e))?;
    println!("{}", text);
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_diff<W: WriteColor>(out: &mut W, diffs: &[Difference]) {
    for diff in diffs {
        match diff {
            Difference::Same(ref x) => {
                let _ = out.reset();
                for line in x.split('\n') {
                    let _ = writeln!(out, " {}", line);
                }
            }
            Difference::Add(ref x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                for line in x.split('\n') {
                    let _ = writeln!(out, "+{}", line);
                }
            }
            Difference::Rem(ref x) => {
                let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                for line in x.split('\n') {
                    let _ = writeln!(out, "-{}", line);
                }
            }
        }
    }
}
