//! Visitor traits for walking the document tree.
//!
//! Traversal is pre-order: a block is announced before its statements, a
//! statement before its children, siblings in document order. Every method
//! has an empty default, so implementors override only what they need.
//!
//! ```ignore
//! struct CountCommands(usize);
//!
//! impl Visitor for CountCommands {
//!     fn visit_statement(&mut self, statement: &Statement) {
//!         if !statement.name.is_empty() {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let mut counter = CountCommands(0);
//! document.accept(&mut counter);
//! ```

use super::{Block, Statement};

/// Read-only traversal, for reporting and analysis.
pub trait Visitor {
    fn visit_block(&mut self, _block: &Block) {}
    fn visit_statement(&mut self, _statement: &Statement) {}
}

/// Mutating traversal, for cleanup transforms.
///
/// A visitor may rewrite the node it is visiting, including replacing its
/// children; the walk descends into whatever children exist afterwards.
pub trait VisitorMut {
    fn visit_block(&mut self, _block: &mut Block) {}
    fn visit_statement(&mut self, _statement: &mut Statement) {}
}
