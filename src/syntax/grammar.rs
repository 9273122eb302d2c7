//! CMake line grammar.
//!
//! Recognizes one logical line (possibly several physical lines joined by
//! `\n`) as an optional command invocation `name(args)` followed by an
//! optional `#` comment. Incomplete text is reported, never guessed at; the
//! line assembler reacts by merging in the next physical line.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

// ============================================================================
// BLOCK TAGS
// ============================================================================

/// Block openers and the names that terminate their block.
///
/// The document root has no entry: it is closed only by end of input.
pub const BLOCK_TAGS: &[(&str, &[&str])] = &[
    ("foreach", &["endforeach"]),
    ("function", &["endfunction"]),
    ("if", &["elseif", "else", "endif"]),
    ("elseif", &["elseif", "else", "endif"]),
    ("else", &["endif"]),
    ("macro", &["endmacro"]),
    ("while", &["endwhile"]),
];

/// Closers for `opener`, or `None` when `opener` does not open a block.
pub fn closers_for(opener: &str) -> Option<&'static [&'static str]> {
    BLOCK_TAGS
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(opener))
        .map(|(_, closers)| *closers)
}

pub fn is_block_opener(name: &str) -> bool {
    closers_for(name).is_some()
}

/// True when `name` ends a block opened by `opener` (case-insensitive).
pub fn is_closer_of(opener: &str, name: &str) -> bool {
    closers_for(opener)
        .map(|closers| closers.iter().any(|c| c.eq_ignore_ascii_case(name)))
        .unwrap_or(false)
}

// ============================================================================
// LOGICAL LINES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The text does not yet form a complete statement.
    #[error("incomplete statement")]
    IncompleteStatement,
}

/// One recognized logical line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalLine {
    /// Command name as written; `""` for blank and comment-only lines.
    pub name: String,
    /// Argument text; `None` when the parentheses hold nothing.
    pub args: Option<String>,
    pub comment: Option<String>,
}

impl LogicalLine {
    pub fn new(name: impl Into<String>, args: Option<&str>, comment: Option<&str>) -> Self {
        Self {
            name: name.into(),
            args: args.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }
}

lazy_static! {
    /// One argument: a whole quoted string, or a bare word running to the
    /// next whitespace. Quotes inside a bare word, or an opening quote that
    /// is never closed, are part of the word.
    static ref ARG_TOKEN: Regex =
        Regex::new(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|(?:\\.|\S)+"#)
            .expect("argument token pattern is valid");
}

/// Parses one logical line.
///
/// `None` is the end-of-input sentinel and yields `Ok(None)`.
pub fn parse_line(line: Option<&str>) -> Result<Option<LogicalLine>, GrammarError> {
    let Some(line) = line else {
        return Ok(None);
    };

    let text = line.trim();
    if text.is_empty() {
        return Ok(Some(LogicalLine::default()));
    }
    if text.starts_with('#') {
        let comment = trailing_comment(text).ok_or(GrammarError::IncompleteStatement)?;
        return Ok(Some(LogicalLine::new("", None, Some(comment))));
    }

    let name_len = text
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if name_len == 0 {
        return Err(GrammarError::IncompleteStatement);
    }
    let (name, rest) = text.split_at(name_len);
    let inner = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(GrammarError::IncompleteStatement)?;

    // The invocation ends at the last `)` that is followed only by
    // whitespace and an optional comment.
    for (close, _) in inner.rmatch_indices(')') {
        let tail = inner[close + 1..].trim_start();
        let comment = if tail.is_empty() {
            None
        } else {
            match trailing_comment(tail) {
                Some(comment) => Some(comment),
                None => continue,
            }
        };

        let raw = inner[..close].trim();
        let line = if raw.contains('\n') {
            multiline_line(name, raw, comment)
        } else {
            LogicalLine::new(name, (!raw.is_empty()).then_some(raw), comment)
        };
        return Ok(Some(line));
    }

    Err(GrammarError::IncompleteStatement)
}

/// A comment that runs to the end of the text, which must be a single line.
fn trailing_comment(text: &str) -> Option<&str> {
    if text.starts_with('#') && !text.contains('\n') {
        Some(text.trim_end())
    } else {
        None
    }
}

/// Separates the argument stream from embedded comments.
fn multiline_line(name: &str, raw: &str, trailing: Option<&str>) -> LogicalLine {
    let mut args: Vec<&str> = Vec::new();
    let mut comments: Vec<&str> = Vec::new();

    let mut pos = 0;
    while pos < raw.len() {
        let rest = &raw[pos..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        if ch == '#' && !raw[..pos].ends_with('\\') {
            if let Some(newline) = rest.find('\n') {
                comments.push(rest[..newline].trim_end());
                pos += newline + 1;
                continue;
            }
        }

        match ARG_TOKEN.find_at(raw, pos) {
            Some(m) if m.start() == pos => {
                args.push(m.as_str());
                pos = m.end();
            }
            // Whitespace between chunks.
            _ => pos += ch.len_utf8(),
        }
    }

    comments.extend(trailing);
    LogicalLine {
        name: name.to_string(),
        args: (!args.is_empty()).then(|| args.join(" ")),
        comment: (!comments.is_empty()).then(|| comments.join("\n")),
    }
}

/// Splits raw argument text into argument tokens.
pub fn split_args(args: &str) -> Vec<String> {
    ARG_TOKEN
        .find_iter(args)
        .map(|m| m.as_str().to_string())
        .collect()
}
