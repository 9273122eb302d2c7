//! Syntax layer: line grammar, line assembly, and block parsing.
//!
//! Raw text flows through [`input::LineCursor`] (physical lines, merged on
//! demand) into [`parser`], which uses [`grammar::parse_line`] to recognize
//! each logical line and builds the statement tree.

pub mod grammar;
pub mod input;
pub mod parser;

pub use grammar::{
    closers_for, is_block_opener, is_closer_of, parse_line, split_args, GrammarError, LogicalLine,
    BLOCK_TAGS,
};
pub use input::LineCursor;
pub use parser::{parse_document, parse_file, parse_named};
