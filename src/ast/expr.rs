//! Expression AST nodes.
//!
//! Mini-PL expressions are deliberately shallow: without parentheses an
//! expression holds at most one binary operator, so `1 + 2 * 3` is rejected by
//! the parser while `1 + (2 * 3)` is accepted. Nesting is only reachable
//! through [`ExprKind::Grouped`].
//!
//! There is no operator precedence to speak of, and no unary minus. The `!`
//! operator may only prefix a boolean literal and is folded into it by the
//! parser.

use std::fmt;

use super::Span;

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// Location of the first token of the expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The different kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal: `42`
    IntLiteral(i64),

    /// String literal with escapes decoded: `"Hello"`
    StringLiteral(String),

    /// Boolean literal, with any leading `!` already applied: `true`, `!false`
    BoolLiteral(bool),

    /// Variable reference: `x`
    Variable(String),

    /// Parenthesized expression: `(expr)`
    Grouped(Box<Expr>),

    /// Binary operation: `left op right`
    ///
    /// Each side is a leaf or a [`ExprKind::Grouped`] expression.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+` - Addition, or concatenation in string context
    Add,
    /// `-` - Subtraction
    Subtract,
    /// `*` - Multiplication
    Multiply,
    /// `/` - Integer division
    Divide,
    /// `<` - Less than
    LessThan,
    /// `>` - Greater than
    GreaterThan,
    /// `<=` - Less than or equal
    LessEqual,
    /// `>=` - Greater than or equal
    GreaterEqual,
    /// `=` - Equality
    Equal,
    /// `!=` - Inequality
    NotEqual,
    /// `&` - Logical "and"; evaluates as inequality of its operands
    And,
}

impl BinaryOp {
    /// Returns true for `+ - * /`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide
        )
    }

    /// Returns true for `< > <= >=`.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOp::LessThan | BinaryOp::GreaterThan | BinaryOp::LessEqual | BinaryOp::GreaterEqual
        )
    }

    /// The source symbol of this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "=",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
