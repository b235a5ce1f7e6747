//! Statement AST nodes.
//!
//! Every Mini-PL statement is terminated by `;` in the source. The statement
//! set is fixed:
//!
//! - **Declaration**: `var x : int [:= expr]`
//! - **Assignment**: `x := expr`
//! - **I/O**: `read x`, `print expr`
//! - **Checks**: `assert (expr)`
//! - **Loop**: `for x in expr .. expr do stmts end for`

use std::fmt;

use super::{Expr, Span, Statements};

/// A statement with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// Location of the first token of the statement.
    pub span: Span,
}

impl Statement {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The different kinds of statements.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `var name : type [:= init]`
    VarInit {
        name: String,
        var_type: VarType,
        init: Option<Expr>,
    },

    /// `name := value`
    Assign { name: String, value: Expr },

    /// `read name`
    Read { name: String },

    /// `print value`
    Print { value: Expr },

    /// `assert (condition)`
    Assert { condition: Expr },

    /// `for variable in start .. end do body end for`
    For {
        /// The loop variable, declared earlier as `int`.
        variable: String,
        /// Inclusive lower bound.
        start: Expr,
        /// Inclusive upper bound.
        end: Expr,
        /// Statements executed once per iteration.
        body: Statements,
    },
}

/// The declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    /// `int` - 64-bit signed integer
    Int,
    /// `bool`
    Bool,
    /// `string`
    Str,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
            VarType::Bool => write!(f, "bool"),
            VarType::Str => write!(f, "string"),
        }
    }
}
