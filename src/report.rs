//! Module dependency report: which modules, files and directories a script
//! pulls in.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::ast::{Statement, Visitor};
use crate::syntax::grammar::split_args;

lazy_static! {
    /// An `include()` target with a path separator or extension is a file.
    static ref FILE_LIKE: Regex = Regex::new(r"[/.]").expect("file pattern is valid");
}

/// Read-only visitor collecting a script's dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleDependencies {
    /// `Find<Name>` for every `find_package(Name ...)`.
    pub find_modules: Vec<String>,
    pub modules: Vec<String>,
    pub optional_modules: Vec<String>,
    pub files: Vec<String>,
    pub optional_files: Vec<String>,
    pub directories: Vec<String>,
}

impl ModuleDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    fn include(&mut self, args: &[String]) {
        let target = args[0].clone();
        let optional = args.iter().any(|a| a == "OPTIONAL");
        let list = match (FILE_LIKE.is_match(&target), optional) {
            (true, false) => &mut self.files,
            (true, true) => &mut self.optional_files,
            (false, false) => &mut self.modules,
            (false, true) => &mut self.optional_modules,
        };
        list.push(target);
    }
}

impl Visitor for ModuleDependencies {
    fn visit_statement(&mut self, statement: &Statement) {
        let args = split_args(statement.args.as_deref().unwrap_or(""));
        let Some(first) = args.first() else {
            return;
        };
        if statement.is_named("find_package") {
            self.find_modules.push(format!("Find{}", first));
        } else if statement.is_named("include") {
            self.include(&args);
        } else if statement.is_named("add_subdirectory") {
            self.directories.push(first.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_document;

    fn collect(source: &str) -> ModuleDependencies {
        let mut deps = ModuleDependencies::new();
        parse_document(source).unwrap().accept(&mut deps);
        deps
    }

    #[test]
    fn test_collects_every_kind() {
        let deps = collect(
            "find_package(Boost REQUIRED)\n\
             include(CTest)\n\
             include(Extra OPTIONAL)\n\
             include(cmake/Helpers.cmake)\n\
             include(local.cmake OPTIONAL)\n\
             if(WIN32)\n  ADD_SUBDIRECTORY(win)\nendif()",
        );
        assert_eq!(deps.find_modules, ["FindBoost"]);
        assert_eq!(deps.modules, ["CTest"]);
        assert_eq!(deps.optional_modules, ["Extra"]);
        assert_eq!(deps.files, ["cmake/Helpers.cmake"]);
        assert_eq!(deps.optional_files, ["local.cmake"]);
        assert_eq!(deps.directories, ["win"]);
    }

    #[test]
    fn test_empty_arguments_are_ignored() {
        assert_eq!(collect("find_package()\ninclude()"), ModuleDependencies::new());
    }
}
