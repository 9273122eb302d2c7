// Script discovery over real directory trees.
use std::fs;
use std::path::{Path, PathBuf};

use cmakescript::discovery::find_cmake_scripts;
use cmakescript::ErrorType;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "project(x)\n").unwrap();
    path
}

fn project_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "CMakeLists.txt");
    touch(dir.path(), "src/CMakeLists.txt");
    touch(dir.path(), "cmake/FindFoo.cmake");
    touch(dir.path(), "cmake/Helpers.CMAKE");
    touch(dir.path(), "README.md");
    touch(dir.path(), "src/main.cpp");
    touch(dir.path(), ".hidden/extra.cmake");
    dir
}

#[test]
fn test_directory_walk_finds_scripts_sorted() {
    let dir = project_tree();
    let found = find_cmake_scripts(dir.path()).unwrap();
    let relative: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        [
            PathBuf::from(".hidden/extra.cmake"),
            PathBuf::from("CMakeLists.txt"),
            PathBuf::from("cmake/FindFoo.cmake"),
            PathBuf::from("cmake/Helpers.CMAKE"),
            PathBuf::from("src/CMakeLists.txt"),
        ]
    );
}

#[test]
fn test_explicit_file_is_taken_regardless_of_name() {
    let dir = project_tree();
    let readme = dir.path().join("README.md");
    assert_eq!(find_cmake_scripts(&readme).unwrap(), [readme]);
}

#[test]
fn test_results_are_absolute() {
    let dir = project_tree();
    for path in find_cmake_scripts(dir.path()).unwrap() {
        assert!(path.is_absolute(), "{}", path.display());
    }
}

#[test]
fn test_missing_start_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_cmake_scripts(dir.path().join("nope")).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Io);
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(find_cmake_scripts(dir.path()).unwrap().is_empty());
}
