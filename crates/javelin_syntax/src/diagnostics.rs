//! Parse errors.
//!
//! There are exactly two failure shapes:
//! - [`ParseError::Syntax`] is recoverable. Member and statement loops catch it, resynchronise and keep going.
//! - [`ParseError::LimitExceeded`] is the bounded parse failure. It is raised when a depth, iteration or element
//!   ceiling from [`crate::limits::ParseLimits`] is hit and always propagates to the caller of `parse`.
//!
//! Both integrate with [`miette`] so callers can render them against the source text.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// A parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// Malformed input at a recoverable position.
    #[error("{message}")]
    #[diagnostic(code(javelin::syntax))]
    Syntax {
        message: String,
        #[label("here")]
        span: Span,
    },

    /// A resource ceiling was exceeded.
    #[error("{limit} exceeded (maximum {max})")]
    #[diagnostic(
        code(javelin::limit_exceeded),
        help("the input nests or repeats a construct beyond what the analyzer accepts")
    )]
    LimitExceeded {
        limit: Limit,
        max: usize,
        #[label("limit reached here")]
        span: Span,
    },
}

impl ParseError {
    /// Creates a recoverable syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
        }
    }

    /// Creates a bounded parse failure.
    #[must_use]
    pub fn limit(limit: Limit, max: usize, span: Span) -> Self {
        Self::LimitExceeded { limit, max, span }
    }

    /// Return `true` for the bounded (non-recoverable) failure.
    pub fn is_limit(&self) -> bool {
        matches!(self, ParseError::LimitExceeded { .. })
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. } | ParseError::LimitExceeded { span, .. } => *span,
        }
    }
}

/// The resource ceiling a [`ParseError::LimitExceeded`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    Depth,
    OperatorChain,
    ParseOperations,
    SwallowTokens,
    ArrayLiteralElements,
    ArrayDimensions,
    GenericParams,
    QualifiedNameParts,
    MemberLookahead,
    AnnotationValues,
    AnnotationArrayElements,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Limit::Depth => "nesting depth",
            Limit::OperatorChain => "operator chain length",
            Limit::ParseOperations => "parse operation budget",
            Limit::SwallowTokens => "skipped expression length",
            Limit::ArrayLiteralElements => "array literal element count",
            Limit::ArrayDimensions => "array dimension count",
            Limit::GenericParams => "generic parameter count",
            Limit::QualifiedNameParts => "qualified name length",
            Limit::MemberLookahead => "member lookahead",
            Limit::AnnotationValues => "annotation value count",
            Limit::AnnotationArrayElements => "annotation array element count",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = ParseError::syntax("expected `;`", Span::new(3, 4));
        assert_eq!(err.to_string(), "expected `;`");
        assert!(!err.is_limit());
        assert_eq!(err.span(), Span::new(3, 4));
    }

    #[test]
    fn test_limit_error_display() {
        let err = ParseError::limit(Limit::Depth, 100, Span::new(10, 11));
        assert_eq!(err.to_string(), "nesting depth exceeded (maximum 100)");
        assert!(err.is_limit());
    }

    #[test]
    fn test_span_converts_to_source_span() {
        let span: miette::SourceSpan = Span::new(4, 9).into();
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 5);
    }
}
