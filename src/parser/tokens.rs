//! Token navigation utilities for the parser.
//!
//! This module provides the low-level token stream operations that form
//! the foundation of the recursive descent parser:
//! - Peeking at tokens without consuming them
//! - Advancing through the token stream
//! - Matching and expecting specific tokens
//! - Error recovery (synchronization)

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};

use super::{ParseError, Parser};

/// Tokens that may legally follow an expression.
pub(super) const EXPRESSION_FOLLOW: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::RightParen,
    TokenKind::Range,
    TokenKind::Do,
];

impl<'a> Parser<'a> {
    // ==================== Token Navigation ====================

    /// Returns the current token without consuming it.
    pub(super) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }

    /// Returns true if we've reached the end of the token stream.
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Checks if the current token matches the expected kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the current token if it matches, returns true if consumed.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true if the current token can begin an operand.
    pub(super) fn at_operand_start(&self) -> bool {
        self.peek_kind().is_some_and(TokenKind::starts_operand)
    }

    /// Expects the current token to match, or records an error.
    pub(super) fn expect(&mut self, kind: &TokenKind, expected_desc: &str) -> Result<&'a Token, ()> {
        if self.check(kind) {
            self.advance().ok_or(())
        } else {
            self.error_at_current(expected_desc);
            Err(())
        }
    }

    // ==================== Error Reporting ====================

    /// Records that `expected` was wanted where the current token stands.
    pub(super) fn error_at_current(&mut self, expected: &str) {
        let error = match self.peek() {
            Some(token) => ParseError::unexpected(expected, describe(token), token.span()),
            None => ParseError::eof(expected),
        };
        self.errors.push(error);
    }

    /// Records a use of `name` if it was never declared.
    pub(super) fn check_declared(&mut self, name: &str, span: Span) {
        if !self.symbols.exists(name) {
            self.errors.push(ParseError::UndeclaredVariable {
                name: name.to_string(),
                span,
            });
        }
    }

    // ==================== Error Recovery ====================

    /// Skips to the start of the next statement.
    ///
    /// A `;` is consumed; statement keywords and `end` are left in place.
    pub(super) fn synchronize(&mut self) {
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Var
                | TokenKind::For
                | TokenKind::Read
                | TokenKind::Print
                | TokenKind::Assert
                | TokenKind::End => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips tokens until one in `follow` is current.
    ///
    /// Never crosses a `;` or `end`.
    pub(super) fn skip_to_follow(&mut self, follow: &[TokenKind]) {
        while let Some(kind) = self.peek_kind() {
            if follow.contains(kind) || is_boundary(kind) {
                return;
            }
            self.advance();
        }
    }

    /// Skips tokens until one can start an operand, or one in `stop` is current.
    ///
    /// Never crosses a `;` or `end`.
    pub(super) fn skip_to_operand_start(&mut self, stop: &[TokenKind]) {
        while let Some(kind) = self.peek_kind() {
            if kind.starts_operand() || stop.contains(kind) || is_boundary(kind) {
                return;
            }
            self.advance();
        }
    }
}

fn is_boundary(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Semicolon | TokenKind::End)
}

/// Describes a token for "found ..." messages.
pub(super) fn describe(token: &Token) -> String {
    match &token.kind {
        TokenKind::Identifier => format!("identifier `{}`", token.text),
        TokenKind::StringLiteral(_) => format!("string {}", token.text),
        TokenKind::Error => format!("unrecognized input `{}`", token.text),
        kind => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_describe() {
        let tokens = lex("foo ; \"s\" @");
        assert_eq!(describe(&tokens[0]), "identifier `foo`");
        assert_eq!(describe(&tokens[1]), "';'");
        assert_eq!(describe(&tokens[2]), "string \"s\"");
        assert_eq!(describe(&tokens[3]), "unrecognized input `@`");
    }

    #[test]
    fn test_synchronize_stops_before_statement() {
        let tokens = lex("1 2 print x;");
        let mut parser = Parser::new(&tokens);
        parser.synchronize();
        assert_eq!(parser.peek_kind(), Some(&TokenKind::Print));
    }

    #[test]
    fn test_synchronize_consumes_semicolon() {
        let tokens = lex("1 2 ; x");
        let mut parser = Parser::new(&tokens);
        parser.synchronize();
        assert_eq!(parser.peek_kind(), Some(&TokenKind::Identifier));
    }

    #[test]
    fn test_skip_to_follow_stops_at_boundary() {
        let tokens = lex("+ + ; do");
        let mut parser = Parser::new(&tokens);
        parser.skip_to_follow(&[TokenKind::Do]);
        assert_eq!(parser.peek_kind(), Some(&TokenKind::Semicolon));
    }

    #[test]
    fn test_skip_to_operand_start() {
        let tokens = lex(") + 5");
        let mut parser = Parser::new(&tokens);
        parser.skip_to_operand_start(&[]);
        assert_eq!(parser.peek_kind(), Some(&TokenKind::IntLiteral(5)));
        assert!(parser.at_operand_start());
    }

    #[test]
    fn test_advance_at_end() {
        let tokens = lex("x");
        let mut parser = Parser::new(&tokens);
        assert!(parser.advance().is_some());
        assert!(parser.advance().is_none());
        assert!(parser.is_at_end());
    }
}
