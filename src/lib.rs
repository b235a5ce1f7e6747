//! # Mini-PL
//!
//! A scanner, parser and tree-walking interpreter for Mini-PL, a small
//! imperative teaching language with `int`, `bool` and `string` variables,
//! a bounded `for` loop, `read`, `print` and `assert`.
//!
//! ## Architecture
//!
//! The interpreter follows a traditional pipeline:
//!
//! ```text
//! Source lines → Lexer → Parser (+ SymbolTable) → AST → Interpreter
//! ```
//!
//! Each phase is implemented as a separate module:
//!
//! - [`lexer`] - Tokenizes source lines into a stream of tokens
//! - [`parser`] - Builds an Abstract Syntax Tree from tokens, recovering from errors
//! - [`symbols`] - Declared identifiers, checked while parsing
//! - [`ast`] - AST type definitions
//! - [`interpreter`] - Executes the AST with type coercion
//! - [`diagnostic`] - Errors rendered against their source line
//! - [`pipeline`] - The whole chain, as used by the `minipl` binary
//! - [`lsp`] - Language Server Protocol implementation for IDE integration
//!
//! ## Example
//!
//! ```
//! use minipl::pipeline;
//!
//! let source = [
//!     "var n : int := 3;",
//!     "var i : int;",
//!     "for i in 1..n do",
//!     "    print i;",
//!     "end for;",
//! ];
//!
//! let mut output = Vec::new();
//! pipeline::run(&source, &b""[..], &mut output).expect("program should run");
//!
//! assert_eq!(output, b"123");
//! ```

pub mod ast;
pub mod diagnostic;
pub mod interpreter;
pub mod lexer;
pub mod lsp;
pub mod parser;
pub mod pipeline;
pub mod symbols;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ast::{
        BinaryOp, Expr, ExprKind, Span, Statement, StatementKind, Statements, VarType,
    };
    pub use crate::diagnostic::Diagnostic;
    pub use crate::interpreter::{ExecError, Interpreter, SemanticError, Value};
    pub use crate::lexer::{Lexer, Token, TokenKind, tokenize};
    pub use crate::parser::{ParseError, Parser};
    pub use crate::pipeline::RunError;
    pub use crate::symbols::SymbolTable;
}
