//! Cleanup transforms applied to a parsed document.
//!
//! Each transform is a [`VisitorMut`] performing one narrow rewrite. They run
//! as separate full traversals in a fixed order; anything they do not
//! recognize passes through untouched.

use tracing::debug;

use crate::ast::{Block, Statement, VisitorMut};
use crate::syntax::grammar::split_args;

/// Closer and `else` keywords whose arguments carry no meaning.
const ARGUMENTLESS: &[&str] = &[
    "else",
    "endif",
    "endmacro",
    "endfunction",
    "endforeach",
    "endwhile",
];

/// Drops the stray conditions often copied into `else()`/`endif()` and
/// the other block closers.
#[derive(Debug, Default)]
pub struct RemoveRedundantConditions {
    pub removed: usize,
}

impl VisitorMut for RemoveRedundantConditions {
    fn visit_statement(&mut self, statement: &mut Statement) {
        if statement.args.is_some() && ARGUMENTLESS.iter().any(|k| statement.is_named(k)) {
            debug!(name = %statement.name, args = ?statement.args, "removing redundant condition");
            statement.args = None;
            self.removed += 1;
        }
    }
}

/// Rewrites the legacy `subdirs(a b ...)` into one `add_subdirectory` per
/// directory.
#[derive(Debug, Default)]
pub struct ReplaceSubdirs {
    pub replaced: usize,
}

impl VisitorMut for ReplaceSubdirs {
    fn visit_statement(&mut self, statement: &mut Statement) {
        if !statement.is_named("subdirs") {
            return;
        }
        let dirs = split_args(statement.args.as_deref().unwrap_or(""));
        match dirs.len() {
            0 => return,
            1 => statement.name = "add_subdirectory".to_string(),
            _ => {
                let replacements = dirs
                    .iter()
                    .map(|dir| Statement::command("add_subdirectory", Some(dir)))
                    .collect();
                statement.replace_with_statements(replacements);
            }
        }
        debug!(directories = dirs.len(), "replaced subdirs");
        self.replaced += 1;
    }
}

/// Runs every cleanup transform over `block`, in place.
///
/// The result may contain splices; use [`cleaned`] to get a flat tree.
pub fn apply_cleanup(block: &mut Block) {
    block.accept_mut(&mut RemoveRedundantConditions::default());
    block.accept_mut(&mut ReplaceSubdirs::default());
}

/// Cleans `block` and resolves the splices the transforms introduced.
pub fn cleaned(mut block: Block) -> Block {
    apply_cleanup(&mut block);
    block.flatten()
}
