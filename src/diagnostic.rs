//! User-facing diagnostics.
//!
//! A [`Diagnostic`] pairs an error message with the source line it refers to,
//! so it can be shown with a caret under the offending column:
//!
//! ```text
//! Line 2, column 7: expected ';', found 'print'
//! print x print y;
//!       ^
//! ```

use std::fmt;

use crate::ast::Span;
use crate::interpreter::SemanticError;
use crate::parser::ParseError;

/// An error rendered against its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Text of the offending line.
    pub source_line: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic at `span` in `lines`.
    ///
    /// Without a usable span the diagnostic points just past the end of the
    /// last line.
    pub fn new<S: AsRef<str>>(lines: &[S], span: Option<Span>, message: impl Into<String>) -> Self {
        let message = message.into();

        if let Some(span) = span
            && let Some(source_line) = span.line.checked_sub(1).and_then(|i| lines.get(i))
        {
            return Self {
                source_line: source_line.as_ref().to_string(),
                line: span.line,
                column: span.column,
                message,
            };
        }

        let source_line = lines.last().map(|l| l.as_ref().to_string()).unwrap_or_default();
        Self {
            column: source_line.chars().count() + 1,
            line: lines.len().max(1),
            source_line,
            message,
        }
    }

    /// Diagnostic for a syntax or name error.
    pub fn from_parse_error<S: AsRef<str>>(lines: &[S], error: &ParseError) -> Self {
        Self::new(lines, error.span(), error.to_string())
    }

    /// Diagnostic for an evaluation error.
    pub fn from_semantic_error<S: AsRef<str>>(lines: &[S], error: &SemanticError) -> Self {
        Self::new(lines, Some(error.span()), error.to_string())
    }

    /// The caret line: whitespace up to the column, then `^`.
    ///
    /// Tabs in the source line are repeated so the caret lines up.
    pub fn caret(&self) -> String {
        let mut caret: String = self
            .source_line
            .chars()
            .chain(std::iter::repeat(' '))
            .take(self.column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        caret.push('^');
        caret
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line {}, column {}: {}", self.line, self.column, self.message)?;
        writeln!(f, "{}", self.source_line)?;
        write!(f, "{}", self.caret())
    }
}
