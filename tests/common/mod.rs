//! # Fixture loader
//!
//! Known-value cases live in `tests/fixtures/*.yaml`. Each case names an
//! input script and either the exact rendered output or the expected error
//! type.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cmakescript::{cleaned, parse_document, render, CMakeError, FormatStyle};
use serde::Deserialize;
use walkdir::WalkDir;

/// A single YAML fixture case.
#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub style: FormatStyle,
    /// Run the cleanup transforms before rendering.
    #[serde(default)]
    pub cleanup: bool,
    pub expected: Option<String>,
    pub expect_error: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Discovers all YAML files recursively under the given root directory.
pub fn discover_yaml_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Loads every case from a fixture file; malformed fixtures fail the test.
pub fn load_cases(path: &Path) -> Vec<FixtureCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse YAML in {}: {}", path.display(), e))
}

/// Runs `case.input` through parse, optional cleanup, and render.
pub fn run_case(case: &FixtureCase) -> Result<String, CMakeError> {
    let tree = parse_document(&case.input)?;
    let tree = if case.cleanup { cleaned(tree) } else { tree };
    Ok(render(&tree, case.style))
}
