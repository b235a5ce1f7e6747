//! Evaluation error types.
//!
//! [`SemanticError`]s are problems found while running a program that the
//! parser could not see: operands of the wrong type, arithmetic faults, bad
//! input. One of them abandons the statement it occurred in and is collected;
//! execution continues with the next statement.
//!
//! [`ExecError`] is the outcome of a whole run that did not succeed.

use crate::ast::{BinaryOp, Span, VarType};
use thiserror::Error;

/// A semantic error with location and description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    // === Variable Errors ===
    /// Reference to a variable that has no value yet.
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    // === Type Errors ===
    /// Expected one type but found another.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: VarType,
        found: VarType,
        span: Span,
    },

    /// Binary operator applied to incompatible types.
    #[error("operator `{op}` cannot be applied to types {left_type} and {right_type}")]
    InvalidBinaryOp {
        op: BinaryOp,
        left_type: VarType,
        right_type: VarType,
        span: Span,
    },

    // === Arithmetic Errors ===
    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero { span: Span },

    /// Integer result out of range.
    #[error("integer overflow in `{op}`")]
    Overflow { op: BinaryOp, span: Span },

    // === Input Errors ===
    /// Text read from input is not a value of the variable's type.
    #[error("cannot read `{text}` as {expected}")]
    InvalidInput {
        text: String,
        expected: VarType,
        span: Span,
    },

    /// `read` with no input left.
    #[error("no input left to read")]
    InputExhausted { span: Span },
}

impl SemanticError {
    /// Returns the primary span of this error.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndefinedVariable { span, .. } => *span,
            SemanticError::TypeMismatch { span, .. } => *span,
            SemanticError::InvalidBinaryOp { span, .. } => *span,
            SemanticError::DivisionByZero { span } => *span,
            SemanticError::Overflow { span, .. } => *span,
            SemanticError::InvalidInput { span, .. } => *span,
            SemanticError::InputExhausted { span } => *span,
        }
    }

    /// Creates an undefined variable error.
    pub fn undefined_variable(name: impl Into<String>, span: Span) -> Self {
        SemanticError::UndefinedVariable {
            name: name.into(),
            span,
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: VarType, found: VarType, span: Span) -> Self {
        SemanticError::TypeMismatch {
            expected,
            found,
            span,
        }
    }
}

/// Why a run stopped or was reported as failed.
#[derive(Debug, Error)]
pub enum ExecError {
    /// An `assert` evaluated to false. Stops the run immediately.
    #[error("assertion failed")]
    AssertionFailed { span: Span },

    /// A semantic error in the statement being executed.
    ///
    /// Statement sequences catch these and record them; they only escape
    /// [`super::Interpreter::execute_statement`].
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// The run finished but recorded semantic errors.
    #[error("{} semantic error(s)", .0.len())]
    Failed(Vec<SemanticError>),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
