//! Line assembler: a cursor over physical lines with one-line lookahead.
//!
//! The parser peeks at the current line, decides what to do with it, and
//! only then accepts it. A line that does not parse on its own is merged with
//! the following physical line and retried, so multi-line invocations reach
//! the grammar as a single logical line.

use tracing::trace;

use crate::diagnostics::{to_error_source, SourceArc};
use crate::syntax::grammar::{parse_line, GrammarError, LogicalLine};
use crate::{err_ctx, CMakeError, Span};

#[derive(Debug, Clone)]
struct PhysicalLine {
    text: String,
    /// Byte offset of the line's first character in the document.
    offset: usize,
}

/// Cursor over a document's physical lines.
///
/// The line list always ends with an end-of-input sentinel (`None`).
#[derive(Debug)]
pub struct LineCursor {
    lines: Vec<Option<PhysicalLine>>,
    index: usize,
    got_line: bool,
    already_seen: bool,
    source: SourceArc,
    text_len: usize,
}

impl LineCursor {
    pub fn new(text: &str) -> Self {
        Self::named("input", text)
    }

    /// A cursor whose diagnostics name the document `name`.
    pub fn named(name: &str, text: &str) -> Self {
        let mut lines: Vec<_> = physical_lines(text)
            .into_iter()
            .map(|(offset, line)| {
                Some(PhysicalLine {
                    text: line.to_string(),
                    offset,
                })
            })
            .collect();
        lines.push(None);

        Self {
            lines,
            index: 0,
            got_line: false,
            already_seen: false,
            source: to_error_source(name, text),
            text_len: text.len(),
        }
    }

    pub fn source(&self) -> &SourceArc {
        &self.source
    }

    /// The current unconsumed line, without advancing.
    ///
    /// Returns `None` once the sentinel itself has been accepted and
    /// `Some(None)` while sitting on it.
    pub fn peek(&mut self) -> Option<Option<&str>> {
        if self.index >= self.lines.len() {
            return None;
        }
        self.already_seen = self.got_line;
        self.got_line = true;
        Some(self.current())
    }

    /// The current line without recording a peek.
    pub fn current(&self) -> Option<&str> {
        self.lines
            .get(self.index)
            .and_then(|line| line.as_ref())
            .map(|line| line.text.as_str())
    }

    /// Whether the current line had already been handed out by an earlier
    /// `peek` before the most recent one.
    pub fn already_seen(&self) -> bool {
        self.already_seen
    }

    /// Number of physical entries accepted so far.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Consumes the current line.
    ///
    /// # Panics
    ///
    /// Panics when no line has been peeked since the last accept.
    pub fn accept(&mut self) {
        assert!(self.got_line, "accept() called without a peeked line");
        self.index += 1;
        self.got_line = false;
    }

    /// Joins the current line with the next physical line.
    ///
    /// Fails with `InputExhausted` when there is no real line left to merge
    /// (the sentinel cannot be merged into anything).
    pub fn merge_forward(&mut self) -> Result<(), CMakeError> {
        assert!(self.got_line, "merge_forward() called without a peeked line");

        if self.lines.len() <= self.index + 2 {
            return Err(err_ctx!(
                InputExhausted,
                "no further lines to merge",
                &self.source,
                self.current_span()
            ));
        }

        #[cfg(debug_assertions)]
        let before = self.pending_text();

        let next = self.lines.remove(self.index + 1);
        if let (Some(current), Some(next)) = (self.lines[self.index].as_mut(), next) {
            current.text.push('\n');
            current.text.push_str(&next.text);
        }

        #[cfg(debug_assertions)]
        debug_assert_eq!(before, self.pending_text());

        trace!(line = self.index, "merged physical lines");
        Ok(())
    }

    /// Produces the current logical line, merging physical lines until it
    /// parses. `Ok(None)` means end of input.
    pub fn next_logical_line(&mut self) -> Result<Option<LogicalLine>, CMakeError> {
        if self.peek().is_none() {
            return Ok(None);
        }
        loop {
            match parse_line(self.current()) {
                Ok(line) => return Ok(line),
                Err(GrammarError::IncompleteStatement) => match self.merge_forward() {
                    Ok(()) => continue,
                    Err(CMakeError::InputExhausted { .. }) => {
                        return Err(self.incomplete_statement());
                    }
                    Err(other) => return Err(other),
                },
            }
        }
    }

    /// Span of the first physical line of the current entry.
    pub fn current_span(&self) -> Span {
        match self.lines.get(self.index).and_then(|l| l.as_ref()) {
            Some(line) => {
                let first = line.text.split('\n').next().unwrap_or("");
                Span {
                    start: line.offset,
                    end: line.offset + first.len(),
                }
            }
            None => {
                Span {
                    start: self.text_len,
                    end: self.text_len,
                }
            }
        }
    }

    fn incomplete_statement(&self) -> CMakeError {
        let preview: String = self
            .current()
            .and_then(|text| text.lines().next())
            .unwrap_or("")
            .trim()
            .chars()
            .take(40)
            .collect();
        err_ctx!(
            IncompleteStatement,
            format!("statement `{}` never completes", preview),
            &self.source,
            self.current_span(),
            "check for a missing `)` or an unterminated quote"
        )
    }

    #[cfg(debug_assertions)]
    fn pending_text(&self) -> String {
        self.lines[self.index..]
            .iter()
            .flatten()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits `text` at `\n`, `\r\n` and lone `\r`, pairing each line with its
/// byte offset. A final line terminator does not start an empty line.
fn physical_lines(text: &str) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let width = match bytes[i] {
            b'\n' => 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\r' => 1,
            _ => {
                i += 1;
                continue;
            }
        };
        lines.push((start, &text[start..i]));
        i += width;
        start = i;
    }
    if start < text.len() {
        lines.push((start, &text[start..]));
    }
    lines
}
