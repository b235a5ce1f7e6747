//! Control flow statement parsing.
//!
//! Mini-PL has a single control flow construct, the counted loop:
//!
//! ```text
//! for IDENT in expr .. expr do
//!     stmts
//! end for
//! ```
//!
//! A broken loop header is reported and the body is still parsed, so errors
//! inside the body are not lost behind the header error.

use crate::ast::{Statement, StatementKind, Statements};
use crate::lexer::TokenKind;

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    // ==================== FOR Loop ====================

    /// Parses a FOR loop.
    pub(super) fn parse_for(&mut self) -> Result<Statement, ()> {
        let span = self.advance().ok_or(())?.span(); // consume FOR

        let variable = self.parse_variable_reference().map(|(name, _)| name);
        if variable.is_err() {
            self.skip_to_follow(&[TokenKind::In, TokenKind::Do]);
        }

        let start = self.parse_loop_bound(
            &TokenKind::In,
            "'in'",
            &[TokenKind::Range, TokenKind::Do],
        );
        let end = self.parse_loop_bound(&TokenKind::Range, "'..'", &[TokenKind::Do]);

        if !self.match_token(&TokenKind::Do) {
            self.error_at_current("'do'");
            if !self.peek_kind().is_some_and(TokenKind::starts_statement) {
                self.skip_to_follow(&[TokenKind::Do]);
                self.match_token(&TokenKind::Do);
            }
        }

        let body = Statements::new(self.parse_statement_list());

        if !self.match_token(&TokenKind::End) {
            self.errors.push(ParseError::MissingEndFor { for_span: span });
            return Err(());
        }
        if !self.match_token(&TokenKind::For) {
            self.error_at_current("'for'");
        }

        Ok(Statement::new(
            StatementKind::For {
                variable: variable?,
                start: start?,
                end: end?,
                body,
            },
            span,
        ))
    }

    /// Parses `keyword expr`, one bound of the loop range.
    ///
    /// A missing keyword is reported and the bound is still parsed if an
    /// operand follows. On failure the parser is left at a token in `follow`.
    fn parse_loop_bound(
        &mut self,
        keyword: &TokenKind,
        keyword_desc: &str,
        follow: &[TokenKind],
    ) -> Result<crate::ast::Expr, ()> {
        if !self.match_token(keyword) {
            self.error_at_current(keyword_desc);
            self.skip_to_operand_start(follow);
            if !self.at_operand_start() {
                return Err(());
            }
        }

        let bound = self.parse_expression();
        if bound.is_err() {
            self.skip_to_follow(follow);
        }
        bound
    }
}
