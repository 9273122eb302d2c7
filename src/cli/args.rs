//! Defines the command-line arguments and subcommands for the cmakescript CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{builder::PossibleValuesParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::format::FormatStyle;
use crate::mergetool::MergeTool;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "cmakescript",
    version,
    about = "Parse, clean up and reformat CMake scripts."
)]
pub struct CMakeScriptArgs {
    /// Log debug events to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean up scripts and show or apply the result.
    Decruft {
        /// Files or directories to process (default: current directory).
        paths: Vec<PathBuf>,
        /// Open a diff/merge application for each changed file.
        #[arg(
            short,
            long,
            value_name = "APPNAME",
            value_parser = PossibleValuesParser::new(MergeTool::names())
        )]
        merge: Option<String>,
        /// Don't print a banner for each file.
        #[arg(short, long)]
        quiet: bool,
        #[arg(long, value_enum, default_value_t = FormatStyle::Nice)]
        style: FormatStyle,
        /// Overwrite changed files in place.
        #[arg(short, long, conflicts_with = "merge")]
        write: bool,
    },
    /// Print a script reformatted, without cleanup.
    Format {
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatStyle::Nice)]
        style: FormatStyle,
    },
    /// Show the parse tree of one or more scripts.
    Dump {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = DumpFormat::Debug)]
        output: DumpFormat,
    },
    /// Report the modules, files and directories scripts depend on, as JSON.
    Deps {
        /// Files or directories to scan (default: current directory).
        paths: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Debug,
    Json,
    Yaml,
}
