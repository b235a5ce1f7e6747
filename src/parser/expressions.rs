//! Expression parsing.
//!
//! An expression is an operand optionally followed by one operator and a
//! second operand. There is no precedence climbing: nesting needs
//! parentheses, and a second operator at the same level is an error.
//!
//! ```text
//! expr    := operand (operator operand)?
//! operand := INT | STRING | IDENT | '(' expr ')' | ['!'] BOOL
//! ```

use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::lexer::TokenKind;

use super::tokens::{EXPRESSION_FOLLOW, describe};
use super::{ParseError, Parser};

/// How deeply parentheses may nest.
const MAX_NESTING_DEPTH: usize = 200;

impl<'a> Parser<'a> {
    // ==================== Expressions ====================

    /// Parses an expression.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ()> {
        let left = self.parse_operand()?;

        let Some(op) = self.peek_kind().and_then(binary_op) else {
            return Ok(left);
        };
        self.advance();

        let right = self.parse_operand()?;
        let span = left.span;
        let expr = Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        );

        if let Some(token) = self.peek()
            && token.kind.is_binary_operator()
        {
            self.errors.push(ParseError::ChainedOperator {
                op: token.text.clone(),
                span: token.span(),
            });
            self.skip_to_follow(EXPRESSION_FOLLOW);
        }

        Ok(expr)
    }

    /// Parses a single operand.
    fn parse_operand(&mut self) -> Result<Expr, ()> {
        let Some(token) = self.peek() else {
            self.errors.push(ParseError::eof("expression"));
            return Err(());
        };
        let span = token.span();

        let kind = match &token.kind {
            TokenKind::IntLiteral(value) => ExprKind::IntLiteral(*value),
            TokenKind::StringLiteral(value) => ExprKind::StringLiteral(value.clone()),
            TokenKind::BoolLiteral(value) => ExprKind::BoolLiteral(*value),

            TokenKind::Identifier => {
                self.check_declared(&token.text, span);
                ExprKind::Variable(token.text.clone())
            }

            TokenKind::Not => {
                self.advance();
                let Some(TokenKind::BoolLiteral(value)) = self.peek_kind() else {
                    self.error_at_current("boolean literal after '!'");
                    return Err(());
                };
                ExprKind::BoolLiteral(!*value)
            }

            TokenKind::LeftParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    self.errors.push(ParseError::TooDeeplyNested {
                        limit: MAX_NESTING_DEPTH,
                        span,
                    });
                    return Err(());
                }
                self.advance();
                self.depth += 1;
                let inner = self.parse_expression();
                self.depth -= 1;
                let inner = inner?;
                if !self.match_token(&TokenKind::RightParen) {
                    self.error_at_current("')'");
                    self.skip_to_follow(&[TokenKind::RightParen]);
                    self.match_token(&TokenKind::RightParen);
                }
                return Ok(Expr::new(ExprKind::Grouped(Box::new(inner)), span));
            }

            TokenKind::Error => {
                self.errors.push(ParseError::UnrecognizedInput {
                    text: token.text.clone(),
                    span,
                });
                self.advance();
                self.skip_to_operand_start(EXPRESSION_FOLLOW);
                if !self.at_operand_start() {
                    return Err(());
                }
                return self.parse_operand();
            }

            _ => {
                self.errors.push(ParseError::InvalidExpression {
                    span,
                    message: format!("expected an operand, found {}", describe(token)),
                });
                return Err(());
            }
        };

        // Consume the literal, identifier or folded boolean
        self.advance();
        Ok(Expr::new(kind, span))
    }
}

/// Maps an operator token to its binary operator.
fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Subtract,
        TokenKind::Star => BinaryOp::Multiply,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::Less => BinaryOp::LessThan,
        TokenKind::Greater => BinaryOp::GreaterThan,
        TokenKind::LessEqual => BinaryOp::LessEqual,
        TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
        TokenKind::Equals => BinaryOp::Equal,
        TokenKind::NotEqual => BinaryOp::NotEqual,
        TokenKind::Ampersand => BinaryOp::And,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr, ExprKind, StatementKind};
    use crate::lexer::tokenize;
    use crate::parser::{ParseError, Parser};

    use super::MAX_NESTING_DEPTH;

    /// Parses `print <expr>;` and returns the expression and errors.
    fn parse_expr(source: &str) -> (Option<Expr>, Vec<ParseError>) {
        let line = format!("var x : int; print {source};");
        let tokens = tokenize(&[line.as_str()]);
        let (program, errors) = Parser::new(&tokens).parse_recovering();
        let expr = program.iter().find_map(|s| match &s.kind {
            StatementKind::Print { value } => Some(value.clone()),
            _ => None,
        });
        (expr, errors)
    }

    #[test]
    fn test_single_operand() {
        let (expr, errors) = parse_expr("42");
        assert!(errors.is_empty());
        assert_eq!(expr.map(|e| e.kind), Some(ExprKind::IntLiteral(42)));
    }

    #[test]
    fn test_binary_expression() {
        let (expr, errors) = parse_expr("x - 1");
        assert!(errors.is_empty());
        match expr.map(|e| e.kind) {
            Some(ExprKind::Binary { left, op, right }) => {
                assert_eq!(left.kind, ExprKind::Variable("x".to_string()));
                assert_eq!(op, BinaryOp::Subtract);
                assert_eq!(right.kind, ExprKind::IntLiteral(1));
            }
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_all_operators() {
        let cases = [
            ("+", BinaryOp::Add),
            ("-", BinaryOp::Subtract),
            ("*", BinaryOp::Multiply),
            ("/", BinaryOp::Divide),
            ("<", BinaryOp::LessThan),
            (">", BinaryOp::GreaterThan),
            ("<=", BinaryOp::LessEqual),
            (">=", BinaryOp::GreaterEqual),
            ("=", BinaryOp::Equal),
            ("!=", BinaryOp::NotEqual),
            ("&", BinaryOp::And),
        ];
        for (symbol, expected) in cases {
            let (expr, errors) = parse_expr(&format!("1 {symbol} 2"));
            assert!(errors.is_empty(), "{symbol}: {errors:?}");
            assert!(
                matches!(expr.map(|e| e.kind), Some(ExprKind::Binary { op, .. }) if op == expected),
                "{symbol}"
            );
        }
    }

    #[test]
    fn test_nested_groups() {
        let (expr, errors) = parse_expr("(4 + (6 * 2))/(2-0)");
        assert!(errors.is_empty());
        match expr.map(|e| e.kind) {
            Some(ExprKind::Binary { left, op, right }) => {
                assert_eq!(op, BinaryOp::Divide);
                assert!(matches!(left.kind, ExprKind::Grouped(_)));
                assert!(matches!(right.kind, ExprKind::Grouped(_)));
            }
            other => panic!("expected division, got {other:?}"),
        }
    }

    #[test]
    fn test_not_is_folded() {
        let (expr, errors) = parse_expr("!true");
        assert!(errors.is_empty());
        assert_eq!(expr.map(|e| e.kind), Some(ExprKind::BoolLiteral(false)));
    }

    #[test]
    fn test_not_requires_boolean_literal() {
        let (_, errors) = parse_expr("!x");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_chained_operator() {
        let (expr, errors) = parse_expr("1 + 2 * 3");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::ChainedOperator { op, .. } if op == "*"));
        assert!(matches!(expr.map(|e| e.kind), Some(ExprKind::Binary { op: BinaryOp::Add, .. })));
    }

    #[test]
    fn test_chained_operator_inside_group() {
        let (expr, errors) = parse_expr("(1 + 2 + 3)");
        assert_eq!(errors.len(), 1);
        assert!(matches!(expr.map(|e| e.kind), Some(ExprKind::Grouped(_))));
    }

    #[test]
    fn test_missing_operand() {
        let (expr, errors) = parse_expr("1 +");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::InvalidExpression { .. }));
        assert!(expr.is_none());
    }

    #[test]
    fn test_unclosed_group() {
        let (expr, errors) = parse_expr("(1 + 2");
        assert_eq!(errors.len(), 1);
        assert!(matches!(expr.map(|e| e.kind), Some(ExprKind::Grouped(_))));
    }

    #[test]
    fn test_expression_span() {
        let (expr, _) = parse_expr("x * 2");
        let span = expr.map(|e| e.span);
        assert_eq!(span.map(|s| (s.line, s.column)), Some((1, 20)));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        let (expr, errors) = parse_expr(&nested(MAX_NESTING_DEPTH));
        assert!(errors.is_empty(), "{errors:?}");
        assert!(expr.is_some());

        let (expr, errors) = parse_expr(&nested(20_000));
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(matches!(
            errors[0],
            ParseError::TooDeeplyNested { limit: MAX_NESTING_DEPTH, span } if span.column == 20 + MAX_NESTING_DEPTH
        ));
        assert!(expr.is_none());
    }
}
