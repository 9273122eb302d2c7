//! The cmakescript Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Scripts are processed one at a time; a script
//! that fails to parse is reported and the run moves on to the next.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::args::{CMakeScriptArgs, Command, DumpFormat},
    discovery::find_cmake_scripts,
    engine::{print_error, FileOutcome, Pipeline},
    format::FormatStyle,
    mergetool::MergeTool,
    report::ModuleDependencies,
    syntax::parser,
    CMakeError,
};

pub mod args;
pub mod output;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = CMakeScriptArgs::parse();
    init_logging(args.verbose);

    let ok = match args.command {
        Command::Decruft {
            paths,
            merge,
            quiet,
            style,
            write,
        } => run_decruft(&paths, merge.as_deref(), quiet, style, write),
        Command::Format { file, style } => run_format(&file, style),
        Command::Dump { files, output } => run_dump(&files, output),
        Command::Deps { paths } => run_deps(&paths),
    };

    if !ok {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn run_decruft(
    paths: &[PathBuf],
    merge: Option<&str>,
    quiet: bool,
    style: FormatStyle,
    write: bool,
) -> bool {
    let tool = match merge.map(MergeTool::from_name).transpose() {
        Ok(tool) => tool,
        Err(e) => {
            print_error(e);
            return false;
        }
    };
    let Some(files) = discover(paths) else {
        return false;
    };

    let pipeline = Pipeline::new(style);
    let total = files.len();
    let mut failed = 0;
    for (index, file) in files.iter().enumerate() {
        if !quiet {
            output::print_banner(file, index + 1, total);
        }
        let outcome = match pipeline.process_file(file) {
            Ok(outcome) => outcome,
            Err(e) => {
                failed += 1;
                print_error(e);
                continue;
            }
        };
        if !outcome.changed {
            debug!(path = %file.display(), "already clean");
            continue;
        }

        let applied = match &tool {
            Some(tool) => launch_merge(tool, &outcome),
            None if write => fs::write(&outcome.path, &outcome.cleaned)
                .map_err(|e| CMakeError::io(format!("writing {}", outcome.path.display()), e)),
            None => {
                output::print_diff(&outcome.original, &outcome.cleaned);
                Ok(())
            }
        };
        if let Err(e) = applied {
            failed += 1;
            print_error(e);
        }
    }

    if failed > 0 {
        warn!(failed, total, "some scripts could not be processed");
    }
    failed == 0
}

fn run_format(file: &Path, style: FormatStyle) -> bool {
    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            print_error(CMakeError::io(format!("reading {}", file.display()), e));
            return false;
        }
    };
    match Pipeline::new(style).format_source(&file.display().to_string(), &source) {
        Ok(text) => {
            print!("{}", text);
            true
        }
        Err(e) => {
            print_error(e);
            false
        }
    }
}

fn run_dump(files: &[PathBuf], format: DumpFormat) -> bool {
    let mut ok = true;
    for file in files {
        let printed = parser::parse_file(file)
            .and_then(|tree| output::print_tree(file, &tree, format));
        if let Err(e) = printed {
            ok = false;
            print_error(e);
        }
    }
    ok
}

fn run_deps(paths: &[PathBuf]) -> bool {
    let Some(files) = discover(paths) else {
        return false;
    };
    let pipeline = Pipeline::default();
    let mut ok = true;
    let mut report = BTreeMap::new();
    for file in &files {
        match pipeline.dependencies(file) {
            Ok(deps) => {
                let short = relative_to_cwd(file);
                let deps = anchor_files(deps, short.parent().unwrap_or(Path::new("")));
                report.insert(short.display().to_string(), deps);
            }
            Err(e) => {
                ok = false;
                print_error(e);
            }
        }
    }
    if let Err(e) = output::print_json(&report) {
        print_error(e);
        ok = false;
    }
    ok
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Expands the command-line paths (default: the current directory) into
/// script files.
fn discover(paths: &[PathBuf]) -> Option<Vec<PathBuf>> {
    let defaults = [PathBuf::from(".")];
    let paths = if paths.is_empty() { &defaults[..] } else { paths };
    let mut files = Vec::new();
    for path in paths {
        match find_cmake_scripts(path) {
            Ok(found) => files.extend(found),
            Err(e) => {
                print_error(e);
                return None;
            }
        }
    }
    Some(files)
}

/// Writes both versions to a scratch directory and opens the merge tool on
/// them, with the real file in the middle.
fn launch_merge(tool: &MergeTool, outcome: &FileOutcome) -> Result<(), CMakeError> {
    let scratch = tempfile::tempdir().map_err(|e| CMakeError::io("creating temp dir", e))?;
    let stem = outcome
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "script".to_string());
    let cleaned = scratch.path().join(format!("{}.Decrufted.cmake", stem));
    let original = scratch.path().join(format!("{}.Original.cmake", stem));
    fs::write(&cleaned, &outcome.cleaned)
        .map_err(|e| CMakeError::io(format!("writing {}", cleaned.display()), e))?;
    fs::write(&original, &outcome.original)
        .map_err(|e| CMakeError::io(format!("writing {}", original.display()), e))?;

    let status = tool.run(&cleaned, &outcome.path, &original)?;
    if !status.success() {
        warn!(tool = tool.name(), %status, "merge tool exited unsuccessfully");
    }
    Ok(())
}

fn relative_to_cwd(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Makes included file paths relative to the including script's directory.
fn anchor_files(mut deps: ModuleDependencies, dir: &Path) -> ModuleDependencies {
    let anchor = |files: Vec<String>| -> Vec<String> {
        files
            .into_iter()
            .map(|f| dir.join(f).display().to_string())
            .collect()
    };
    deps.files = anchor(std::mem::take(&mut deps.files));
    deps.optional_files = anchor(std::mem::take(&mut deps.optional_files));
    deps
}
