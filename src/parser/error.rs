//! Parser error types.
//!
//! Parse errors capture what went wrong and where, enabling good error messages.
//! The parser collects multiple errors rather than stopping at the first one,
//! which provides better feedback to users.
//!
//! Name errors (redeclaration, use of an undeclared variable) are detected
//! while parsing and are reported alongside syntax errors.

use crate::ast::Span;
use thiserror::Error;

/// A parse error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Expected a specific token but found something else.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What we expected to find.
        expected: String,
        /// What we actually found.
        found: String,
        /// Location of the unexpected token.
        span: Span,
    },

    /// Reached end of input unexpectedly.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof {
        /// What we expected to find.
        expected: String,
    },

    /// Characters the scanner could not recognize.
    #[error("unrecognized input `{text}`")]
    UnrecognizedInput {
        /// The unrecognized characters.
        text: String,
        /// Location of the first unrecognized character.
        span: Span,
    },

    /// Invalid expression.
    #[error("invalid expression: {message}")]
    InvalidExpression {
        /// Location of the invalid expression.
        span: Span,
        /// Additional context about what went wrong.
        message: String,
    },

    /// Invalid statement.
    #[error("invalid statement: {message}")]
    InvalidStatement {
        /// Location of the invalid statement.
        span: Span,
        /// Description of the problem.
        message: String,
    },

    /// A second operator in an expression without parentheses.
    #[error("an expression may contain at most one operator, use parentheses to nest `{op}`")]
    ChainedOperator {
        /// The extra operator.
        op: String,
        /// Location of the extra operator.
        span: Span,
    },

    /// Variable declared more than once.
    #[error("variable `{name}` is already declared on line {}", .original_span.line)]
    Redeclaration {
        name: String,
        original_span: Span,
        duplicate_span: Span,
    },

    /// Variable used before its declaration.
    #[error("variable `{name}` is not declared")]
    UndeclaredVariable { name: String, span: Span },

    /// Missing `end for` for a FOR loop.
    #[error("missing `end for` for the loop starting on line {}", .for_span.line)]
    MissingEndFor {
        /// Location of the `for` that's missing its `end for`.
        for_span: Span,
    },

    /// Parentheses nested deeper than the parser allows.
    #[error("expression nested more than {limit} levels deep")]
    TooDeeplyNested {
        /// The maximum nesting depth.
        limit: usize,
        /// Location of the first parenthesis past the limit.
        span: Span,
    },
}

impl ParseError {
    /// Returns the span of this error, if available.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
            ParseError::UnrecognizedInput { span, .. } => Some(*span),
            ParseError::InvalidExpression { span, .. } => Some(*span),
            ParseError::InvalidStatement { span, .. } => Some(*span),
            ParseError::ChainedOperator { span, .. } => Some(*span),
            ParseError::Redeclaration { duplicate_span, .. } => Some(*duplicate_span),
            ParseError::UndeclaredVariable { span, .. } => Some(*span),
            ParseError::MissingEndFor { for_span } => Some(*for_span),
            ParseError::TooDeeplyNested { span, .. } => Some(*span),
        }
    }

    /// Creates an "unexpected token" error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Creates an "unexpected EOF" error.
    pub fn eof(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
        }
    }
}
