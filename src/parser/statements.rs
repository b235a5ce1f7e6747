//! Statement parsing for the parser.
//!
//! This module contains the statement dispatcher, the statement-list
//! production shared by the program and loop bodies, and the simple
//! statements: `var`, assignment, `read`, `print` and `assert`.
//!
//! The `for` loop is handled in `control_flow.rs`.

use crate::ast::{Span, Statement, StatementKind, VarType};
use crate::lexer::TokenKind;

use super::tokens::describe;
use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    // ==================== Statement Lists ====================

    /// Parses `stmt ';'` pairs until `end` or the end of input.
    ///
    /// Failed statements are dropped after resynchronizing; the loop always
    /// makes progress.
    pub(super) fn parse_statement_list(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if *kind == TokenKind::End {
                break;
            }
            let start = self.current;

            match self.parse_statement() {
                Ok(statement) => {
                    log::trace!("parsed statement on line {}", statement.span.line);
                    statements.push(statement);
                    if self.expect(&TokenKind::Semicolon, "';'").is_err() {
                        self.synchronize();
                    }
                }
                Err(()) => self.synchronize(),
            }

            if self.current == start {
                self.advance();
            }
        }

        statements
    }

    // ==================== Statement Dispatcher ====================

    /// Parses a single statement, without its terminating `;`.
    pub(super) fn parse_statement(&mut self) -> Result<Statement, ()> {
        let Some(token) = self.peek() else {
            self.errors.push(ParseError::eof("statement"));
            return Err(());
        };

        match &token.kind {
            TokenKind::Var => self.parse_var(),
            TokenKind::For => self.parse_for(),
            TokenKind::Read => self.parse_read(),
            TokenKind::Print => self.parse_print(),
            TokenKind::Assert => self.parse_assert(),
            TokenKind::Identifier => self.parse_assignment(),

            TokenKind::Error => {
                self.errors.push(ParseError::UnrecognizedInput {
                    text: token.text.clone(),
                    span: token.span(),
                });
                self.advance();
                Err(())
            }

            _ => {
                self.errors.push(ParseError::InvalidStatement {
                    span: token.span(),
                    message: format!("expected a statement, found {}", describe(token)),
                });
                self.advance();
                Err(())
            }
        }
    }

    // ==================== Declarations ====================

    /// Parses `var IDENT ':' type [':=' expr]`.
    fn parse_var(&mut self) -> Result<Statement, ()> {
        let span = self.advance().ok_or(())?.span(); // consume VAR

        let name_token = self.expect(&TokenKind::Identifier, "variable name")?;
        let name = name_token.text.clone();
        let name_span = name_token.span();
        if !self.symbols.declare(&name, name_span) {
            let original_span = self.symbols.declaration(&name).unwrap_or(name_span);
            self.errors.push(ParseError::Redeclaration {
                name: name.clone(),
                original_span,
                duplicate_span: name_span,
            });
        }

        if !self.match_token(&TokenKind::Colon) {
            self.error_at_current("':'");
            self.skip_to_follow(&[
                TokenKind::Colon,
                TokenKind::Int,
                TokenKind::Bool,
                TokenKind::StringType,
            ]);
            self.match_token(&TokenKind::Colon);
        }

        let var_type = self.parse_type()?;

        let init = match self.peek_kind() {
            Some(TokenKind::Assign) => {
                self.advance();
                Some(self.parse_expression()?)
            }
            Some(TokenKind::Semicolon) | None => None,
            Some(_) => Some(self.recover_missing_assign("':=' or ';'")?),
        };

        Ok(Statement::new(
            StatementKind::VarInit {
                name,
                var_type,
                init,
            },
            span,
        ))
    }

    /// Parses one of the three type keywords.
    fn parse_type(&mut self) -> Result<VarType, ()> {
        let var_type = match self.peek_kind() {
            Some(TokenKind::Int) => VarType::Int,
            Some(TokenKind::Bool) => VarType::Bool,
            Some(TokenKind::StringType) => VarType::Str,
            _ => {
                self.error_at_current("type");
                return Err(());
            }
        };
        self.advance();
        Ok(var_type)
    }

    // ==================== Assignment ====================

    /// Parses `IDENT ':=' expr`.
    fn parse_assignment(&mut self) -> Result<Statement, ()> {
        let token = self.advance().ok_or(())?;
        let span = token.span();
        let name = token.text.clone();
        self.check_declared(&name, span);

        let value = if self.match_token(&TokenKind::Assign) {
            self.parse_expression()?
        } else {
            self.recover_missing_assign("':='")?
        };

        Ok(Statement::new(StatementKind::Assign { name, value }, span))
    }

    /// Reports a missing `:=` once, then parses the expression that follows
    /// the next token able to start one.
    fn recover_missing_assign(&mut self, expected: &str) -> Result<crate::ast::Expr, ()> {
        self.error_at_current(expected);
        self.skip_to_operand_start(&[]);
        if !self.at_operand_start() {
            return Err(());
        }
        self.parse_expression()
    }

    // ==================== I/O Statements ====================

    /// Parses `read IDENT`.
    fn parse_read(&mut self) -> Result<Statement, ()> {
        let span = self.advance().ok_or(())?.span(); // consume READ
        let (name, _) = self.parse_variable_reference()?;
        Ok(Statement::new(StatementKind::Read { name }, span))
    }

    /// Parses `print expr`.
    fn parse_print(&mut self) -> Result<Statement, ()> {
        let span = self.advance().ok_or(())?.span(); // consume PRINT
        let value = self.parse_expression()?;
        Ok(Statement::new(StatementKind::Print { value }, span))
    }

    /// Parses `assert '(' expr ')'`.
    fn parse_assert(&mut self) -> Result<Statement, ()> {
        let span = self.advance().ok_or(())?.span(); // consume ASSERT

        let opened = self.match_token(&TokenKind::LeftParen);
        if !opened {
            self.error_at_current("'('");
            self.skip_to_operand_start(&[]);
            if !self.at_operand_start() {
                return Err(());
            }
        }

        let condition = self.parse_expression()?;

        // Only one of a pair of missing parentheses is reported
        if !self.match_token(&TokenKind::RightParen) && opened {
            self.error_at_current("')'");
            self.skip_to_follow(&[TokenKind::RightParen]);
            self.match_token(&TokenKind::RightParen);
        }

        Ok(Statement::new(StatementKind::Assert { condition }, span))
    }

    // ==================== Helpers ====================

    /// Parses an identifier that names an existing variable.
    pub(super) fn parse_variable_reference(&mut self) -> Result<(String, Span), ()> {
        let token = self.expect(&TokenKind::Identifier, "variable name")?;
        let span = token.span();
        self.check_declared(&token.text, span);
        Ok((token.text.clone(), span))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ExprKind, Statements, StatementKind, VarType};
    use crate::lexer::tokenize;
    use crate::parser::{ParseError, Parser};

    fn parse_recovering(lines: &[&str]) -> (Statements, Vec<ParseError>) {
        let tokens = tokenize(lines);
        Parser::new(&tokens).parse_recovering()
    }

    #[test]
    fn test_var_with_initializer() {
        let (program, errors) = parse_recovering(&["var s : string := \"hi\";"]);
        assert!(errors.is_empty());
        match &program.statements[0].kind {
            StatementKind::VarInit {
                name,
                var_type,
                init: Some(init),
            } => {
                assert_eq!(name, "s");
                assert_eq!(*var_type, VarType::Str);
                assert_eq!(init.kind, ExprKind::StringLiteral("hi".to_string()));
            }
            other => panic!("expected initialized declaration, got {other:?}"),
        }
        assert_eq!(program.statements[0].span.column, 1);
    }

    #[test]
    fn test_var_with_equals_instead_of_assign() {
        let (program, errors) = parse_recovering(&["var x : int = 5;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ParseError::UnexpectedToken { expected, .. } if expected == "':=' or ';'"
        ));
        assert!(matches!(
            &program.statements[0].kind,
            StatementKind::VarInit { init: Some(_), .. }
        ));
    }

    #[test]
    fn test_var_missing_colon() {
        let (program, errors) = parse_recovering(&["var x int;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_assignment_missing_operator() {
        let (program, errors) = parse_recovering(&["var x : int;", "x 5;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span().map(|s| (s.line, s.column)), Some((2, 3)));
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_assignment_without_value() {
        let (program, errors) = parse_recovering(&["var x : int;", "x;", "print x;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_read_requires_identifier() {
        let (_, errors) = parse_recovering(&["read 5;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ParseError::UnexpectedToken { expected, .. } if expected == "variable name"
        ));
    }

    #[test]
    fn test_assert_requires_parentheses() {
        let (program, errors) = parse_recovering(&["assert true;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(program.len(), 1);

        let (_, errors) = parse_recovering(&["assert (true;"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_invalid_statement_start() {
        let (program, errors) = parse_recovering(&[") print 1;", "print 2;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::InvalidStatement { .. }));
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_statement_span_is_first_token() {
        let (program, _) = parse_recovering(&["  print 1;"]);
        assert_eq!(program.statements[0].span.column, 3);
    }
}
