//! cmakescript: parse CMake scripts into a lossless statement tree, apply
//! cleanup transforms, and render the tree back to normalized text.
//!
//! ```ignore
//! let mut tree = cmakescript::parse_document("SUBDIRS(a b)\nif(X)\nendif(X)")?;
//! cmakescript::apply_cleanup(&mut tree);
//! let text = cmakescript::render(&tree.flatten(), cmakescript::FormatStyle::Nice);
//! ```

pub use crate::ast::{Block, Span, Statement};
pub use crate::diagnostics::{CMakeError, ErrorContext, ErrorType};
pub use crate::format::{render, FormatStyle};
pub use crate::syntax::{parse_document, parse_file, parse_named};
pub use crate::transforms::{apply_cleanup, cleaned};

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod discovery;
pub mod engine;
pub mod format;
pub mod mergetool;
pub mod report;
pub mod syntax;
pub mod transforms;
