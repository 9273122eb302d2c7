//! Document tree for parsed CMake scripts.
//!
//! A document is a [`Block`] of [`Statement`]s. Statements that open a block
//! (`if`, `foreach`, ...) own a child [`Block`]; their closers (`endif`, ...)
//! are ordinary siblings that follow them. Every node is exclusively owned by
//! its parent, so transforms mutate the tree in place through `&mut`.

use serde::{Deserialize, Serialize};

pub mod visitor;

pub use visitor::{Visitor, VisitorMut};

/// A byte range in a script, used to point diagnostics at statements.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One command invocation, comment-only line, blank line, or splice point.
///
/// - `name == ""` with no children is a blank or comment-only line.
/// - `name == ""` with children is a splice: it stands in for the statements
///   it holds and is flattened away before output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub name: String,
    pub args: Option<String>,
    pub comment: Option<String>,
    pub children: Option<Block>,
}

impl Statement {
    pub fn new(
        name: impl Into<String>,
        args: Option<String>,
        comment: Option<String>,
        children: Option<Block>,
    ) -> Self {
        Self {
            name: name.into(),
            args,
            comment,
            children,
        }
    }

    /// A childless command invocation.
    pub fn command(name: impl Into<String>, args: Option<&str>) -> Self {
        Self::new(name, args.map(str::to_string), None, None)
    }

    pub fn comment_only(comment: impl Into<String>) -> Self {
        Self::new("", None, Some(comment.into()), None)
    }

    pub fn blank() -> Self {
        Self::new("", None, None, None)
    }

    /// True for nodes that only stand in for their children.
    pub fn is_splice(&self) -> bool {
        self.name.is_empty() && self.children.is_some()
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Turns this statement into a splice holding `statements`.
    ///
    /// A trailing comment on the original statement survives as a
    /// comment-only statement in front of the replacements.
    pub fn replace_with_statements(&mut self, mut statements: Vec<Statement>) {
        if !self.is_splice() {
            if let Some(comment) = self.comment.take() {
                statements.insert(0, Statement::comment_only(comment));
            }
            self.name.clear();
            self.args = None;
        }
        self.children = Some(Block::new(statements));
    }

    /// Statements this node contributes to its parent once splices are
    /// resolved.
    pub fn flatten(&self) -> Vec<Statement> {
        if self.is_splice() {
            return self
                .children
                .as_ref()
                .map(Block::flatten)
                .map(|b| b.statements)
                .unwrap_or_default();
        }
        vec![Statement {
            name: self.name.clone(),
            args: self.args.clone(),
            comment: self.comment.clone(),
            children: self.children.as_ref().map(Block::flatten),
        }]
    }

    /// Notifies `visitor` of this statement, then walks its children.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_statement(self);
        if let Some(children) = &self.children {
            children.accept(visitor);
        }
    }

    /// Mutating walk; children are read after the visit, so replacements
    /// made by the visitor are the ones descended into.
    pub fn accept_mut(&mut self, visitor: &mut dyn VisitorMut) {
        visitor.visit_statement(self);
        if let Some(children) = &mut self.children {
            children.accept_mut(visitor);
        }
    }
}

/// An ordered list of sibling statements; the document root is a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// A copy of this block with every splice replaced by its contents.
    pub fn flatten(&self) -> Block {
        Block::new(self.statements.iter().flat_map(Statement::flatten).collect())
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_block(self);
        for statement in &self.statements {
            statement.accept(visitor);
        }
    }

    pub fn accept_mut(&mut self, visitor: &mut dyn VisitorMut) {
        visitor.visit_block(self);
        for statement in &mut self.statements {
            statement.accept_mut(visitor);
        }
    }

    /// Copy with every statement name lowercased; arguments and comments
    /// keep their case.
    pub fn with_folded_names(&self) -> Block {
        Block::new(
            self.statements
                .iter()
                .map(|s| Statement {
                    name: s.name.to_ascii_lowercase(),
                    args: s.args.clone(),
                    comment: s.comment.clone(),
                    children: s.children.as_ref().map(Block::with_folded_names),
                })
                .collect(),
        )
    }
}

impl From<Vec<Statement>> for Block {
    fn from(statements: Vec<Statement>) -> Self {
        Block::new(statements)
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
