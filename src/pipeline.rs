//! The complete scan → parse → execute pipeline.
//!
//! These functions are what the command-line runner calls. They take the
//! program as a sequence of source lines and turn every failure into
//! [`Diagnostic`]s rendered against those lines.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::ast::Statements;
use crate::diagnostic::Diagnostic;
use crate::interpreter::{ExecError, Interpreter};
use crate::lexer::tokenize;
use crate::parser::Parser;

/// Why a program did not run to a clean finish.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program did not parse. Nothing was executed.
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<Diagnostic>),

    /// The program ran but hit semantic errors.
    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<Diagnostic>),

    /// An `assert` failed and the run was stopped.
    #[error("assertion failed")]
    AssertionFailed(Diagnostic),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    /// Diagnostics to show the user, in source order of discovery.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            RunError::Syntax(diagnostics) | RunError::Semantic(diagnostics) => diagnostics,
            RunError::AssertionFailed(diagnostic) => std::slice::from_ref(diagnostic),
            RunError::Io(_) => &[],
        }
    }
}

/// Scans and parses `lines` without executing them.
pub fn check<S: AsRef<str>>(lines: &[S]) -> Result<Statements, Vec<Diagnostic>> {
    let tokens = tokenize(lines);
    Parser::new(&tokens).parse().map_err(|errors| {
        errors
            .iter()
            .map(|error| Diagnostic::from_parse_error(lines, error))
            .collect()
    })
}

/// Scans, parses and executes `lines`.
///
/// `read` statements consume lines of `input`; `print` writes to `output`.
pub fn run<S, R, W>(lines: &[S], input: R, output: W) -> Result<(), RunError>
where
    S: AsRef<str>,
    R: BufRead,
    W: Write,
{
    let program = check(lines).map_err(RunError::Syntax)?;

    Interpreter::new(input, output)
        .run(&program)
        .map_err(|error| match error {
            ExecError::AssertionFailed { span } => {
                RunError::AssertionFailed(Diagnostic::new(lines, Some(span), "assertion failed"))
            }
            ExecError::Semantic(error) => {
                RunError::Semantic(vec![Diagnostic::from_semantic_error(lines, &error)])
            }
            ExecError::Failed(errors) => RunError::Semantic(
                errors
                    .iter()
                    .map(|error| Diagnostic::from_semantic_error(lines, error))
                    .collect(),
            ),
            ExecError::Io(error) => RunError::Io(error),
        })
}
