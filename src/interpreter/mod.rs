//! Tree-walking interpreter for Mini-PL.
//!
//! The interpreter executes a parsed [`Statements`] tree against a flat
//! variable store, reading `read` input from an injected [`BufRead`] and
//! writing `print` output to an injected [`Write`].
//!
//! # Example
//!
//! ```
//! use minipl::interpreter::{Interpreter, Value};
//! use minipl::lexer::tokenize;
//! use minipl::parser::Parser;
//!
//! let tokens = tokenize(&["var x : int := (1 + 3) * (4 / 2);", "print x;"]);
//! let program = Parser::new(&tokens).parse().expect("parse failed");
//!
//! let mut output = Vec::new();
//! let mut interpreter = Interpreter::new(&b""[..], &mut output);
//! interpreter.run(&program).expect("run failed");
//! assert_eq!(interpreter.variable("x"), Some(&Value::Int(8)));
//! drop(interpreter);
//! assert_eq!(output, b"8");
//! ```
//!
//! # Typing
//!
//! Expressions carry no static types. Each evaluation context asks for a
//! value of one type (`int` for loop bounds, `bool` for `assert`, the
//! variable's type for declarations and assignments, and "anything printable"
//! for `print`), and an expression is interpreted by trying `bool`, then
//! `int`, then `string`. The attempts have no side effects; an error is only
//! built once every interpretation has failed.
//!
//! # Failure Policy
//!
//! A [`SemanticError`] abandons the statement it occurred in. It is recorded
//! and execution continues with the next statement; the run is reported as
//! [`ExecError::Failed`] at the end. A false `assert` stops the whole run at
//! once with [`ExecError::AssertionFailed`].

mod error;
mod expressions;
mod statements;
mod value;

pub use error::{ExecError, SemanticError};
pub use value::Value;

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::ast::{Span, Statements};

/// Executes Mini-PL programs.
pub struct Interpreter<R, W> {
    /// Current value of every variable declared so far.
    variables: HashMap<String, Value>,
    /// Semantic errors recorded during the current run.
    errors: Vec<SemanticError>,
    /// Source of `read` lines.
    input: R,
    /// Sink for `print` output.
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Creates an interpreter with an empty variable store.
    pub fn new(input: R, output: W) -> Self {
        Self {
            variables: HashMap::new(),
            errors: Vec::new(),
            input,
            output,
        }
    }

    /// Runs a whole program.
    ///
    /// The variable store and error list are cleared first. Output is flushed
    /// whatever the outcome.
    pub fn run(&mut self, program: &Statements) -> Result<(), ExecError> {
        self.variables.clear();
        self.errors.clear();
        log::debug!("executing {} top-level statements", program.len());

        let result = self.execute_statements(program);
        let flushed = self.output.flush();
        result?;
        flushed?;

        log::debug!("execution finished with {} semantic errors", self.errors.len());
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ExecError::Failed(self.errors.clone()))
        }
    }

    /// Current value of `name`, if it has been declared by an executed `var`.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Semantic errors recorded so far.
    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    /// Looks up a variable, failing if no `var` for it has run.
    fn lookup(&self, name: &str, span: Span) -> Result<&Value, SemanticError> {
        self.variables
            .get(name)
            .ok_or_else(|| SemanticError::undefined_variable(name, span))
    }
}

impl Statements {
    /// Executes this program with a fresh interpreter.
    pub fn execute<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<(), ExecError> {
        Interpreter::new(input, output).run(self)
    }
}
