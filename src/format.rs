//! Renders a document tree back to CMake text.
//!
//! Output re-parses to the same tree: comment lines picked up inside a
//! multi-line argument list are put back inside the argument list, and
//! wrapped arguments use the continuation form the line assembler merges.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::ast::{Block, Statement};
use crate::syntax::grammar::split_args;

/// One level of indentation.
pub const INDENT: &str = "\t";

/// Widest single-line invocation the nice style leaves unwrapped.
pub const COLUMN_BUDGET: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Names and arguments exactly as parsed.
    Classic,
    /// Lowercase names, normalized argument spacing, long lists wrapped.
    #[default]
    Nice,
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatStyle::Classic => f.write_str("classic"),
            FormatStyle::Nice => f.write_str("nice"),
        }
    }
}

/// Renders `block` as script text. Every line, including the last, ends
/// with a newline, so trailing blank statements survive a re-parse.
pub fn render(block: &Block, style: FormatStyle) -> String {
    let mut lines = Vec::new();
    Formatter { style }.block(block, 0, &mut lines);
    lines.iter().fold(String::new(), |mut text, line| {
        text.push_str(line);
        text.push('\n');
        text
    })
}

struct Formatter {
    style: FormatStyle,
}

impl Formatter {
    fn block(&self, block: &Block, depth: usize, out: &mut Vec<String>) {
        for statement in block {
            self.statement(statement, depth, out);
        }
    }

    fn statement(&self, statement: &Statement, depth: usize, out: &mut Vec<String>) {
        if statement.is_splice() {
            if let Some(children) = &statement.children {
                self.block(children, depth, out);
            }
            return;
        }

        let indent = INDENT.repeat(depth);
        let comments: Vec<&str> = statement
            .comment
            .as_deref()
            .map(|c| c.split('\n').collect())
            .unwrap_or_default();

        if statement.name.is_empty() {
            if comments.is_empty() {
                out.push(String::new());
            }
            for comment in comments {
                out.push(format!("{}{}", indent, comment));
            }
            return;
        }

        let (embedded, trailing) = match comments.split_last() {
            Some((last, rest)) => (rest, Some(*last)),
            None => (&[][..], None),
        };

        let name = match self.style {
            FormatStyle::Classic => statement.name.clone(),
            FormatStyle::Nice => statement.name.to_lowercase(),
        };
        let args = statement.args.as_deref().unwrap_or("");
        let tokens = split_args(args);

        // Comments with nowhere to go inside the parentheses become their
        // own lines ahead of the statement.
        let embeddable = !embedded.is_empty() && !tokens.is_empty();
        if !embedded.is_empty() && !embeddable {
            for comment in embedded {
                out.push(format!("{}{}", indent, comment));
            }
        }

        let wrap = self.style == FormatStyle::Nice
            && columns(&format!("{}{}({})", indent, name, tokens.join(" "))) > COLUMN_BUDGET;
        let continuation = format!("\n{}", INDENT.repeat(depth + 1));
        let separator = if wrap { continuation.as_str() } else { " " };

        let arg_text = if embeddable {
            embed_comments(&tokens, embedded, separator, &continuation)
        } else {
            match self.style {
                FormatStyle::Classic => args.to_string(),
                FormatStyle::Nice => tokens.join(separator),
            }
        };

        let mut line = format!("{}{}({})", indent, name, arg_text);
        if let Some(comment) = trailing {
            line.push('\t');
            line.push_str(comment);
        }
        out.push(line);

        if let Some(children) = &statement.children {
            self.block(children, depth + 1, out);
        }
    }
}

/// Argument text with `comments` placed before the final token, each
/// closing its own physical line.
fn embed_comments(
    tokens: &[String],
    comments: &[&str],
    separator: &str,
    continuation: &str,
) -> String {
    let (last, leading) = match tokens.split_last() {
        Some(split) => split,
        None => return String::new(),
    };
    let mut text = leading.join(separator);
    for comment in comments {
        if !text.is_empty() && !text.ends_with(continuation) {
            text.push(' ');
        }
        text.push_str(comment);
        text.push_str(continuation);
    }
    text.push_str(last);
    text
}

/// Display columns, counting a tab as one column.
fn columns(text: &str) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => 1,
            c => c.width().unwrap_or(0),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_document;

    fn classic(source: &str) -> String {
        render(&parse_document(source).unwrap(), FormatStyle::Classic)
    }

    fn nice(source: &str) -> String {
        render(&parse_document(source).unwrap(), FormatStyle::Nice)
    }

    #[test]
    fn test_classic_keeps_names_and_args() {
        assert_eq!(classic("Foo(a  b)"), "Foo(a  b)\n");
        assert_eq!(classic("foo()\n"), "foo()\n");
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(classic(""), "");
    }

    #[test]
    fn test_nice_normalizes_names_and_spacing() {
        assert_eq!(
            nice("MESSAGE( STATUS   \"Hi there\" )"),
            "message(STATUS \"Hi there\")\n"
        );
    }

    #[test]
    fn test_children_are_indented_with_tabs() {
        assert_eq!(
            classic("if(A)\n  foo()\n  if(B)\n    bar()\n  endif()\nendif()"),
            "if(A)\n\tfoo()\n\tif(B)\n\t\tbar()\n\tendif()\nendif()\n"
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(classic("foo(a)   # note"), "foo(a)\t# note\n");
        assert_eq!(classic("# top"), "# top\n");
        assert_eq!(classic("if(A)\n # inner\nendif()"), "if(A)\n\t# inner\nendif()\n");
    }

    #[test]
    fn test_blank_lines_are_never_indented() {
        assert_eq!(classic("a()\n\nif(A)\n\nendif()"), "a()\n\nif(A)\n\nendif()\n");
    }

    #[test]
    fn test_trailing_blank_line_survives_reparse() {
        let output = classic("a()\n\n");
        assert_eq!(output, "a()\n\n");
        assert_eq!(parse_document(&output).unwrap().len(), 2);
    }

    #[test]
    fn test_nice_wraps_past_column_budget() {
        let args = (0..12).map(|i| format!("source{:02}.cpp", i)).collect::<Vec<_>>();
        let source = format!("add_library(core {})", args.join(" "));
        let output = nice(&source);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "add_library(core");
        assert_eq!(lines[1], "\tsource00.cpp");
        assert_eq!(lines[12], "\tsource11.cpp)");
    }

    #[test]
    fn test_nice_wrap_counts_indentation() {
        let args = format!("{} yy", "x".repeat(64));
        assert_eq!(nice(&format!("foo({})", args)), format!("foo({})\n", args));
        let nested = nice(&format!("if(A)\nfoo({})\nendif()", args));
        assert!(nested.contains("\n\t\tyy)\n"));
    }

    #[test]
    fn test_nice_wrap_ignores_redundant_spacing() {
        let args = format!("{}     yy", "x".repeat(64));
        assert_eq!(nice(&format!("foo({})", args)), format!("foo({} yy)\n", "x".repeat(64)));
    }

    #[test]
    fn test_wide_characters_count_double() {
        let args = "漢".repeat(34);
        assert_eq!(columns(&format!("foo({})", args)), 73);
        assert!(nice(&format!("foo({} b)", args)).contains("\n\tb)"));
    }

    #[test]
    fn test_embedded_comments_are_reembedded() {
        let source = "foo(a # first\n  b # second\n  c) # last";
        let output = classic(source);
        assert_eq!(output, "foo(a b # first\n\t# second\n\tc)\t# last\n");
        assert_eq!(
            parse_document(&output).unwrap(),
            parse_document(source).unwrap()
        );
    }

    #[test]
    fn test_comments_without_arguments_move_above() {
        let tree = Block::new(vec![Statement::new(
            "foo",
            None,
            Some("# only\n# last".into()),
            None,
        )]);
        assert_eq!(render(&tree, FormatStyle::Classic), "# only\nfoo()\t# last\n");
    }

    #[test]
    fn test_splices_render_at_their_own_depth() {
        let mut subdirs = Statement::command("subdirs", Some("a b"));
        subdirs.replace_with_statements(vec![
            Statement::command("add_subdirectory", Some("a")),
            Statement::command("add_subdirectory", Some("b")),
        ]);
        let tree = Block::new(vec![
            Statement::new("if", Some("A".into()), None, Some(Block::new(vec![subdirs]))),
            Statement::command("endif", None),
        ]);
        assert_eq!(
            render(&tree, FormatStyle::Classic),
            "if(A)\n\tadd_subdirectory(a)\n\tadd_subdirectory(b)\nendif()\n"
        );
    }

    #[test]
    fn test_lone_apostrophe_survives_both_styles() {
        for source in ["message(STATUS can't find it)\n", "message(STATUS\n  can't find it)\n"] {
            let tree = parse_document(source).unwrap();
            assert_eq!(tree.statements[0].args.as_deref(), Some("STATUS can't find it"));
            for style in [FormatStyle::Classic, FormatStyle::Nice] {
                let output = render(&tree, style);
                assert!(output.contains("can't"), "{style}: {output:?}");
                assert_eq!(parse_document(&output).unwrap(), tree, "{style}: {output:?}");
            }
        }
        assert_eq!(nice("MESSAGE(say \"hi)"), "message(say \"hi)\n");
    }

    #[test]
    fn test_style_display_matches_value_names() {
        assert_eq!(FormatStyle::Classic.to_string(), "classic");
        assert_eq!(FormatStyle::default(), FormatStyle::Nice);
    }
}
