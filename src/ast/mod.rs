//! Abstract Syntax Tree (AST) definitions for Mini-PL.
//!
//! The AST represents the hierarchical structure of a Mini-PL program after
//! parsing. Each node in the tree corresponds to a syntactic construct in the
//! source code.
//!
//! # Structure
//!
//! ```text
//! Statements
//! └── Vec<Statement>
//!     ├── VarInit { name, var_type, init: Option<Expr> }
//!     ├── Assign { name, value: Expr }
//!     ├── Read { name }
//!     ├── Print { value: Expr }
//!     ├── Assert { condition: Expr }
//!     └── For { variable, start, end, body: Statements }
//! ```
//!
//! # Design Decisions
//!
//! - **Owned nodes**: AST nodes own their children (no lifetimes). A `for`
//!   body is an owned subtree, never shared.
//! - **Span on every node**: Every node records the line and column of the
//!   token it starts with, so evaluation failures can be reported with a caret.
//! - **Immutable after parsing**: the parser builds the tree once; the
//!   interpreter only borrows it.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

/// A location in the source text.
///
/// Lines and columns are 1-based and columns count characters, matching the
/// lexer's token positions.
///
/// # Example
///
/// ```
/// use minipl::ast::Span;
///
/// let span = Span::new(3, 5, 2);
/// assert_eq!(span.line, 3);
/// assert_eq!(span.column, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
    /// Length in characters.
    pub len: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(line: usize, column: usize, len: usize) -> Self {
        Self { line, column, len }
    }
}

/// An ordered block of statements: the program root or a loop body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statements {
    /// The statements, in execution order.
    pub statements: Vec<Statement>,
}

impl Statements {
    /// Creates a block from the given statements.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Number of statements directly in this block.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the block has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterates over the statements of this block.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a Statements {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
