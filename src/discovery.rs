//! Finds the CMake scripts to process under a starting path.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::CMakeError;

lazy_static! {
    /// `CMakeLists.txt` or any `*.cmake` module, matched on the basename.
    static ref SCRIPT_NAME: Regex =
        Regex::new(r"(?i)^CMakeLists\.txt$|\.cmake$").expect("script name pattern is valid");
}

/// Returns true if `path` names a CMake script by its file name.
pub fn is_cmake_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SCRIPT_NAME.is_match(name))
}

/// Collects the scripts reachable from `start`.
///
/// A file is returned as given, whatever its name. A directory is walked
/// recursively and its scripts are returned in sorted order. Paths are made
/// absolute.
pub fn find_cmake_scripts<P: AsRef<Path>>(start: P) -> Result<Vec<PathBuf>, CMakeError> {
    let start = absolute(start.as_ref())?;
    if start.is_file() {
        return Ok(vec![start]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&start) {
        let entry = entry.map_err(|e| {
            CMakeError::io(format!("walking {}", start.display()), e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_cmake_script(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    debug!(start = %start.display(), found = files.len(), "discovered scripts");
    Ok(files)
}

fn absolute(path: &Path) -> Result<PathBuf, CMakeError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| CMakeError::io("current directory", e))?;
    Ok(cwd.join(path))
}
