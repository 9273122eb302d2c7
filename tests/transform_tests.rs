// tests/transform_tests.rs

use cmakescript::ast::{Visitor, VisitorMut};
use cmakescript::report::ModuleDependencies;
use cmakescript::transforms::{RemoveRedundantConditions, ReplaceSubdirs};
use cmakescript::{apply_cleanup, cleaned, parse_document, render, FormatStyle, Statement};

#[test]
fn test_subdirs_become_add_subdirectory_siblings() {
    let tree = cleaned(parse_document("subdirs(x y)").unwrap());
    assert_eq!(
        tree.statements,
        [
            Statement::command("add_subdirectory", Some("x")),
            Statement::command("add_subdirectory", Some("y")),
        ]
    );
}

#[test]
fn test_endif_condition_is_removed_but_if_condition_stays() {
    let mut tree = parse_document("if(X)\nendif(X)").unwrap();
    apply_cleanup(&mut tree);
    assert_eq!(tree.statements[0].args.as_deref(), Some("X"));
    assert_eq!(tree.statements[1].args, None);
}

#[test]
fn test_apply_cleanup_leaves_splices_until_flattened() {
    let mut tree = parse_document("subdirs(a b c)").unwrap();
    apply_cleanup(&mut tree);
    assert_eq!(tree.len(), 1);
    assert!(tree.statements[0].is_splice());
    assert_eq!(tree.flatten().len(), 3);
}

#[test]
fn test_transforms_can_run_individually() {
    let mut tree = parse_document("subdirs(a b)\nwhile(1)\nendwhile(1)").unwrap();

    let mut subdirs = ReplaceSubdirs::default();
    tree.accept_mut(&mut subdirs);
    assert_eq!(subdirs.replaced, 1);
    assert_eq!(tree.statements[2].args.as_deref(), Some("1"));

    let mut conditions = RemoveRedundantConditions::default();
    tree.accept_mut(&mut conditions);
    assert_eq!(conditions.removed, 1);
    assert_eq!(tree.statements[2].args, None);
}

#[test]
fn test_cleanup_then_render() {
    let source = "\
PROJECT(demo)
IF(BUILD_TESTS)
  SUBDIRS(tests bench) # legacy layout
ELSE(BUILD_TESTS)
ENDIF(BUILD_TESTS)
";
    let output = render(&cleaned(parse_document(source).unwrap()), FormatStyle::Nice);
    assert_eq!(
        output,
        "project(demo)\n\
         if(BUILD_TESTS)\n\
         \t# legacy layout\n\
         \tadd_subdirectory(tests)\n\
         \tadd_subdirectory(bench)\n\
         else()\n\
         endif()\n"
    );
}

#[test]
fn test_dependency_report_sees_replaced_subdirs() {
    let tree = cleaned(parse_document("find_package(Qt5)\nsubdirs(app lib)").unwrap());
    let mut deps = ModuleDependencies::new();
    tree.accept(&mut deps);
    assert_eq!(deps.find_modules, ["FindQt5"]);
    assert_eq!(deps.directories, ["app", "lib"]);
}

#[test]
fn test_custom_read_only_visitor() {
    #[derive(Default)]
    struct Commands(Vec<String>);

    impl Visitor for Commands {
        fn visit_statement(&mut self, statement: &Statement) {
            if !statement.name.is_empty() {
                self.0.push(statement.name.to_lowercase());
            }
        }
    }

    let tree = parse_document("# c\nif(A)\n  foo()\nendif()").unwrap();
    let mut commands = Commands::default();
    tree.accept(&mut commands);
    assert_eq!(commands.0, ["if", "foo", "endif"]);
}
