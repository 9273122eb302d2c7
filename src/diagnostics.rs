//! Unified, `miette`-based diagnostics for cmakescript.
//!
//! Every failure the crate can report is a [`CMakeError`]. Errors that point
//! into a script carry an [`ErrorContext`] with the named source and a byte
//! span, so the CLI can render them with labels through `miette::Report`.
//!
//! # Error Construction Macros
//!
//! - `err_msg!(Internal, "unknown merge tool {}", name)` for message-only errors.
//! - `err_ctx!(UnclosedChildBlock, msg, &source, span, help)` for errors that
//!   point at a location in a script.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe classification of [`CMakeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A statement never became complete before the input ran out.
    IncompleteStatement,
    /// The line assembler had nothing left to merge.
    InputExhausted,
    /// A block opener without its closer.
    UnclosedChildBlock,
    /// File system or subprocess failures.
    Io,
    /// Broken invariants and bad configuration.
    Internal,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::IncompleteStatement => "IncompleteStatement",
            ErrorType::InputExhausted => "InputExhausted",
            ErrorType::UnclosedChildBlock => "UnclosedChildBlock",
            ErrorType::Io => "Io",
            ErrorType::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single additional label for multi-span diagnostics.
#[derive(Debug)]
pub struct RelatedLabel {
    pub span: Span,
    pub label: String,
}

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The script the error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span inside `source` (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
    /// Additional labeled spans inside the same source.
    pub related: Vec<RelatedLabel>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
            related: vec![],
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.related.push(RelatedLabel {
            span,
            label: label.into(),
        });
        self
    }
}

/// Unified error type for every cmakescript failure mode.
#[derive(Debug, Error)]
pub enum CMakeError {
    #[error("Incomplete statement: {message}")]
    IncompleteStatement { message: String, ctx: ErrorContext },
    #[error("Input exhausted: {message}")]
    InputExhausted { message: String, ctx: ErrorContext },
    #[error("Unclosed child block: {message}")]
    UnclosedChildBlock { message: String, ctx: ErrorContext },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("Internal error: {message}")]
    Internal { message: String, ctx: ErrorContext },
}

impl CMakeError {
    fn ctx(&self) -> &ErrorContext {
        match self {
            CMakeError::IncompleteStatement { ctx, .. }
            | CMakeError::InputExhausted { ctx, .. }
            | CMakeError::UnclosedChildBlock { ctx, .. }
            | CMakeError::Io { ctx, .. }
            | CMakeError::Internal { ctx, .. } => ctx,
        }
    }

    fn message(&self) -> &str {
        match self {
            CMakeError::IncompleteStatement { message, .. }
            | CMakeError::InputExhausted { message, .. }
            | CMakeError::UnclosedChildBlock { message, .. }
            | CMakeError::Io { message, .. }
            | CMakeError::Internal { message, .. } => message,
        }
    }

    /// Returns the type-safe classification of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CMakeError::IncompleteStatement { .. } => ErrorType::IncompleteStatement,
            CMakeError::InputExhausted { .. } => ErrorType::InputExhausted,
            CMakeError::UnclosedChildBlock { .. } => ErrorType::UnclosedChildBlock,
            CMakeError::Io { .. } => ErrorType::Io,
            CMakeError::Internal { .. } => ErrorType::Internal,
        }
    }

    /// The primary span, when the error points into a script.
    pub fn span(&self) -> Option<Span> {
        self.ctx().span
    }

    /// Wraps an I/O failure, naming the path or action that failed.
    pub fn io(what: impl std::fmt::Display, err: std::io::Error) -> Self {
        CMakeError::Io {
            message: format!("{}: {}", what, err),
            ctx: ErrorContext::none(),
            source: Some(err),
        }
    }
}

impl Diagnostic for CMakeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            CMakeError::IncompleteStatement { .. } => "cmakescript::parse::incomplete_statement",
            CMakeError::InputExhausted { .. } => "cmakescript::parse::input_exhausted",
            CMakeError::UnclosedChildBlock { .. } => "cmakescript::parse::unclosed_child_block",
            CMakeError::Io { .. } => "cmakescript::io",
            CMakeError::Internal { .. } => "cmakescript::internal",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.ctx();
        let mut labels = Vec::new();
        if let Some(span) = ctx.span {
            labels.push(LabeledSpan::new(
                Some(self.message().to_string()),
                span.start,
                span.len().max(1),
            ));
        }
        for rel in &ctx.related {
            labels.push(LabeledSpan::new(
                Some(rel.label.clone()),
                rel.span.start,
                rel.span.len().max(1),
            ));
        }
        if labels.is_empty() {
            None
        } else {
            Some(Box::new(labels.into_iter()))
        }
    }
}

/// Converts a script's name and text into a shareable `miette` source.
pub fn to_error_source(name: impl AsRef<str>, text: impl Into<String>) -> SourceArc {
    Arc::new(NamedSource::new(name.as_ref(), text.into()))
}

/// Constructs a `CMakeError` variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::CMakeError::$variant {
            message: format!($msg, $($arg),+),
            ctx: $crate::ErrorContext::none(),
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::CMakeError::$variant {
            message: format!("{}", $msg),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Constructs a `CMakeError` variant that points at a span of a script.
#[macro_export]
macro_rules! err_ctx {
    // Message, src, span, help
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::CMakeError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            )
            .with_help(format!("{}", $help)),
        }
    };
    // Message, src, span
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::CMakeError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            ),
        }
    };
}
