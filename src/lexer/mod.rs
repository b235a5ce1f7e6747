//! Lexical analysis for Mini-PL.
//!
//! This module converts Mini-PL source lines into a stream of [`Token`]s.
//! It handles:
//!
//! - Keyword, type and operator recognition (longest match first)
//! - Integer, boolean and string literals (with `\"` and `\\` escapes)
//! - Line comments (`//`) and block comments (`/* */`) spanning several lines
//! - 1-based line and column tracking for diagnostics
//!
//! ## Example
//!
//! ```
//! use minipl::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize(&["var i : int := 1;", "print i;"]);
//! assert_eq!(tokens[0].kind, TokenKind::Var);
//! assert_eq!(tokens[7].line, 2);
//! ```
//!
//! ## Design Notes
//!
//! The lexer is built on the [`logos`](https://docs.rs/logos) crate. The source
//! lines are joined with `\n` before lexing so that block comments can span
//! line boundaries; byte offsets are mapped back to line/column pairs with a
//! table of line start offsets.
//!
//! Unrecognized characters never abort scanning. Consecutive unrecognized
//! characters on one line are merged into a single [`TokenKind::Error`] token
//! so that one typo produces one diagnostic rather than a flood.

mod token;

pub use token::{Token, TokenClass, TokenKind, unescape};

use logos::Logos;

/// A pending run of unrecognized characters.
struct ErrorRun {
    start: usize,
    end: usize,
    line: usize,
}

/// The lexer for Mini-PL source code.
///
/// Wraps a `logos` lexer and provides an iterator interface that yields
/// [`Token`]s with their line and column.
///
/// ## Example
///
/// ```
/// use minipl::lexer::{Lexer, TokenKind};
///
/// let source = "print 42;";
/// let tokens: Vec<_> = Lexer::new(source).collect();
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[0].kind, TokenKind::Print);
/// assert_eq!(tokens[1].kind, TokenKind::IntLiteral(42));
/// assert_eq!(tokens[1].column, 7);
/// ```
pub struct Lexer<'source> {
    /// The underlying logos lexer
    inner: logos::Lexer<'source, TokenKind>,
    /// The original source (for error token text and columns)
    source: &'source str,
    /// Byte offset at which each line starts
    line_starts: Vec<usize>,
    /// Unrecognized characters not yet emitted
    pending_error: Option<ErrorRun>,
    /// A valid token found while an error run was pending
    lookahead: Option<Token>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            inner: TokenKind::lexer(source),
            source,
            line_starts,
            pending_error: None,
            lookahead: None,
        }
    }

    /// Maps a byte offset to a 1-based (line, column) pair.
    fn line_column(&self, offset: usize) -> (usize, usize) {
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[index];
        let column = self.source[line_start..offset].chars().count() + 1;
        (index + 1, column)
    }

    /// Builds the error token for a finished run.
    fn flush(&self, run: ErrorRun) -> Token {
        let (line, column) = self.line_column(run.start);
        Token::new(TokenKind::Error, line, column, &self.source[run.start..run.end])
    }

    /// Get the next token, if any.
    ///
    /// Returns `None` when the end of input is reached. Unrecognized input is
    /// returned as [`TokenKind::Error`] tokens.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.lookahead.take() {
            return Some(token);
        }

        loop {
            let Some(result) = self.inner.next() else {
                return self.pending_error.take().map(|run| self.flush(run));
            };
            let span = self.inner.span();
            let (line, column) = self.line_column(span.start);

            match result {
                Ok(kind) => {
                    let token = Token::new(kind, line, column, self.inner.slice());
                    return match self.pending_error.take() {
                        Some(run) => {
                            self.lookahead = Some(token);
                            Some(self.flush(run))
                        }
                        None => Some(token),
                    };
                }
                Err(()) => match self.pending_error.take() {
                    Some(mut run) if run.line == line => {
                        run.end = span.end;
                        self.pending_error = Some(run);
                    }
                    Some(run) => {
                        self.pending_error = Some(ErrorRun {
                            start: span.start,
                            end: span.end,
                            line,
                        });
                        return Some(self.flush(run));
                    }
                    None => {
                        self.pending_error = Some(ErrorRun {
                            start: span.start,
                            end: span.end,
                            line,
                        });
                    }
                },
            }
        }
    }

    /// Collect all remaining tokens into a vector.
    ///
    /// This consumes the lexer.
    pub fn collect_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Convenience function to lex a single source string directly.
///
/// # Example
///
/// ```
/// use minipl::lexer::{lex, TokenKind};
///
/// let tokens = lex("read n;");
/// assert_eq!(tokens[0].kind, TokenKind::Read);
/// ```
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect_tokens()
}

/// Produces the token sequence for an ordered sequence of source lines.
///
/// Line numbers in the returned tokens are 1-based indices into `lines`.
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Vec<Token> {
    let source = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let tokens = lex(&source);
    log::debug!(
        "scanned {} lines into {} tokens ({} unrecognized)",
        lines.len(),
        tokens.len(),
        tokens.iter().filter(|t| t.kind == TokenKind::Error).count()
    );
    tokens
}
