//! Recursive-descent block parser.
//!
//! Builds the statement tree from logical lines. Each call to
//! `parse_block_children` handles one nesting level: it collects sibling
//! statements until it meets a closer for its opener (left unconsumed for the
//! caller, which then takes it as an ordinary sibling) or the end of input.

use std::path::Path;

use tracing::{debug, trace};

use crate::ast::{Block, Statement};
use crate::syntax::grammar::{closers_for, is_block_opener, is_closer_of};
use crate::syntax::input::LineCursor;
use crate::{CMakeError, ErrorContext, Span};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a script held in memory.
pub fn parse_document(text: &str) -> Result<Block, CMakeError> {
    parse_named("input", text)
}

/// Parses a script, naming it `name` in diagnostics.
pub fn parse_named(name: &str, text: &str) -> Result<Block, CMakeError> {
    let block = BlockParser::new(LineCursor::named(name, text)).parse()?;
    debug!(document = name, statements = block.len(), "parsed document");
    Ok(block)
}

/// Reads and parses a script file.
pub fn parse_file(path: &Path) -> Result<Block, CMakeError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CMakeError::io(format!("reading {}", path.display()), e))?;
    parse_named(&path.display().to_string(), &text)
}

// ============================================================================
// BLOCK PARSER
// ============================================================================

/// Parser state: the cursor is the only mutable state, and the call stack
/// mirrors the block nesting.
#[derive(Debug)]
pub struct BlockParser {
    cursor: LineCursor,
}

impl BlockParser {
    pub fn new(cursor: LineCursor) -> Self {
        Self { cursor }
    }

    /// Parses the whole document into its root block.
    pub fn parse(mut self) -> Result<Block, CMakeError> {
        Ok(self.parse_block_children(None, None)?.unwrap_or_default())
    }

    /// Collects the children of a block opened by `open_tag`.
    ///
    /// `None` is the document root. A tag that opens no block has no
    /// children and consumes nothing.
    fn parse_block_children(
        &mut self,
        open_tag: Option<&str>,
        opened_at: Option<Span>,
    ) -> Result<Option<Block>, CMakeError> {
        if let Some(tag) = open_tag {
            if !is_block_opener(tag) {
                return Ok(None);
            }
            trace!(tag, "open block");
        }

        let mut statements = Vec::new();
        let mut last_span = None;
        loop {
            let Some(line) = self.cursor.next_logical_line()? else {
                return match open_tag {
                    None => Ok(Some(Block::new(statements))),
                    Some(tag) => Err(self.unclosed_child_block(tag, opened_at, last_span)),
                };
            };

            // A closer seen for the first time ends this block; the caller
            // peeks it again and takes it as a sibling.
            if let Some(tag) = open_tag {
                if is_closer_of(tag, &line.name) && !self.cursor.already_seen() {
                    trace!(tag, closer = %line.name, "close block");
                    return Ok(Some(Block::new(statements)));
                }
            }

            let span = self.cursor.current_span();
            last_span = Some(span);
            self.cursor.accept();
            let children = self.parse_block_children(Some(&line.name), Some(span))?;
            statements.push(Statement::new(
                line.name,
                line.args,
                line.comment,
                children,
            ));
        }
    }

    fn unclosed_child_block(
        &self,
        tag: &str,
        opened_at: Option<Span>,
        last: Option<Span>,
    ) -> CMakeError {
        let expected = closers_for(tag)
            .map(|closers| {
                closers
                    .iter()
                    .map(|c| format!("{}()", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let span = opened_at.unwrap_or_else(|| self.cursor.current_span());
        let mut ctx = ErrorContext::with_source_and_span(self.cursor.source().clone(), span)
            .with_help(format!("expected one of: {}", expected));
        if let Some(last) = last.filter(|l| !l.is_empty()) {
            ctx = ctx.with_related(last, "last statement in the block");
        }
        CMakeError::UnclosedChildBlock {
            message: format!("`{}` block is never closed", tag),
            ctx,
        }
    }
}
