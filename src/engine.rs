//! Per-document pipeline: parse, clean, format.
//!
//! Every call builds its own cursor and tree; nothing is shared between
//! documents, so callers may process files in any order or in parallel.

use std::path::{Path, PathBuf};

use miette::Report;
use tracing::{debug, info};

use crate::{
    ast::Block,
    format::{render, FormatStyle},
    report::ModuleDependencies,
    syntax::parser,
    transforms, CMakeError,
};

/// Prints an error with its source snippet to stderr.
pub fn print_error(error: CMakeError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

/// The result of decrufting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub original: String,
    /// Cleaned and formatted text.
    pub cleaned: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    pub style: FormatStyle,
}

impl Pipeline {
    pub fn new(style: FormatStyle) -> Self {
        Self { style }
    }

    /// Parses and re-renders `source` without cleanup.
    pub fn format_source(&self, name: &str, source: &str) -> Result<String, CMakeError> {
        let tree = parser::parse_named(name, source)?;
        Ok(render(&tree, self.style))
    }

    /// Parses, cleans and renders `source`.
    pub fn decruft_source(&self, name: &str, source: &str) -> Result<String, CMakeError> {
        let tree = self.decruft_tree(parser::parse_named(name, source)?);
        Ok(render(&tree, self.style))
    }

    /// Decrufts the file at `path`. The file is not modified.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, CMakeError> {
        let original = std::fs::read_to_string(path)
            .map_err(|e| CMakeError::io(format!("reading {}", path.display()), e))?;
        let cleaned = self.decruft_source(&path.display().to_string(), &original)?;
        let changed = cleaned != original;
        info!(path = %path.display(), changed, "processed file");
        Ok(FileOutcome {
            path: path.to_path_buf(),
            original,
            cleaned,
            changed,
        })
    }

    /// Collects the dependencies of the file at `path`.
    pub fn dependencies(&self, path: &Path) -> Result<ModuleDependencies, CMakeError> {
        let tree = parser::parse_file(path)?;
        let mut deps = ModuleDependencies::new();
        tree.accept(&mut deps);
        Ok(deps)
    }

    fn decruft_tree(&self, tree: Block) -> Block {
        let tree = transforms::cleaned(tree);
        debug!(statements = tree.len(), "cleanup applied");
        tree
    }
}
