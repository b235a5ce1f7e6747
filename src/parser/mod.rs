//! Parser for Mini-PL.
//!
//! The parser transforms a stream of tokens into an Abstract Syntax Tree (AST).
//! It is a predictive recursive-descent parser with one procedure per grammar
//! production and a single token of lookahead:
//!
//! ```text
//! stmts     := stmt ';' (stmt ';')*
//! stmt      := 'var' IDENT ':' type stmt_tail
//!            | 'for' IDENT 'in' expr '..' expr 'do' stmts 'end' 'for'
//!            | 'read' IDENT
//!            | 'print' expr
//!            | 'assert' '(' expr ')'
//!            | IDENT ':=' expr
//! stmt_tail := ':=' expr | ε
//! expr      := operand (operator operand)?
//! operand   := INT | STRING | IDENT | '(' expr ')' | ['!'] BOOL
//! type      := 'int' | 'bool' | 'string'
//! ```
//!
//! # Example
//!
//! ```
//! use minipl::lexer::tokenize;
//! use minipl::parser::Parser;
//!
//! let tokens = tokenize(&["var x : int := 3;", "print x;"]);
//! let mut parser = Parser::new(&tokens);
//! let program = parser.parse().expect("parse failed");
//!
//! assert_eq!(program.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! - [`tokens`] - Token navigation utilities and error recovery
//! - [`expressions`] - `expr` and `operand` productions
//! - [`statements`] - Statement dispatcher and simple statements
//! - [`control_flow`] - The `for` loop
//! - [`error`] - Parse error types
//!
//! # Error Recovery
//!
//! The parser never stops at the first error. After recording an error it
//! resynchronizes with one of three strategies: skipping to a token in the
//! production's FOLLOW set, skipping to the next token that can start an
//! expression, or skipping to the start of the next statement. All errors are
//! returned together once the token stream is consumed.
//!
//! The parser also owns the [`SymbolTable`] used to report redeclared and
//! undeclared variables. It is reset at the start of every parse.

mod control_flow;
mod error;
mod expressions;
mod statements;
mod tokens;

pub use error::ParseError;

use crate::ast::Statements;
use crate::lexer::{Token, TokenKind};
use crate::symbols::SymbolTable;

/// Parser for Mini-PL source code.
///
/// The parser consumes a slice of tokens and produces an AST.
/// Errors are collected and returned at the end rather than failing immediately.
pub struct Parser<'a> {
    /// The tokens to parse.
    tokens: &'a [Token],
    /// Current position in the token stream.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Names declared so far in this compilation unit.
    symbols: SymbolTable,
    /// Parentheses open around the current token.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            symbols: SymbolTable::new(),
            depth: 0,
        }
    }

    /// Parses the token stream into a program AST.
    ///
    /// Returns the program if successful, or the collected errors if parsing failed.
    pub fn parse(&mut self) -> Result<Statements, Vec<ParseError>> {
        let (program, errors) = self.parse_recovering();

        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }

    /// Parses the token stream, returning the best-effort tree together with
    /// every error found.
    ///
    /// Statements that could not be parsed are left out of the tree; statements
    /// that only contain name errors are kept.
    pub fn parse_recovering(&mut self) -> (Statements, Vec<ParseError>) {
        self.current = 0;
        self.depth = 0;
        self.errors.clear();
        self.symbols.reset();

        let program = Statements::new(self.parse_program());
        log::debug!(
            "parsed {} top-level statements with {} errors",
            program.len(),
            self.errors.len()
        );

        (program, std::mem::take(&mut self.errors))
    }

    /// The symbol table as left by the last parse.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parses a complete program (sequence of statements).
    fn parse_program(&mut self) -> Vec<crate::ast::Statement> {
        let mut statements = Vec::new();

        loop {
            statements.extend(self.parse_statement_list());

            // The list only stops early at an `end` with no loop to close
            let Some(token) = self.advance() else {
                break;
            };
            self.errors.push(ParseError::InvalidStatement {
                span: token.span(),
                message: "`end` without a matching `for`".to_string(),
            });
            self.match_token(&TokenKind::For);
            self.match_token(&TokenKind::Semicolon);
        }

        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, StatementKind, VarType};
    use crate::lexer::tokenize;

    fn parse(lines: &[&str]) -> Result<Statements, Vec<ParseError>> {
        let tokens = tokenize(lines);
        let mut parser = Parser::new(&tokens);
        parser.parse()
    }

    fn errors(lines: &[&str]) -> Vec<ParseError> {
        parse(lines).expect_err("expected parse errors")
    }

    const SAMPLE: &[&str] = &[
        "var nTimes : int := 0;",
        "var s : string := \"How many times?\";",
        "print s;",
        "read nTimes;",
        "var x : int;",
        "x := 0;",
        "for x in 0..nTimes-1 do ",
        "    print x;",
        "    print \" : Hello, World!\\n\";",
        "end for;",
        "var b : bool := x = nTimes;",
        "assert (b);",
    ];

    #[test]
    fn test_parse_valid_programs() {
        let programs: &[&[&str]] = &[
            SAMPLE,
            &["var x : int;", "var y :  bool;", "var z :   string;"],
            &[
                "var x : int := (4 + (6 * 2))/(2-0);",
                "var y : bool := !true & true;",
                "var z : bool := 3 < 2;",
                "assert(x > 2);",
                "assert(3 >= 2);",
                "assert(x <= 12);",
                "assert(x = 8);",
                "for x in 0..5*4 do",
                "print x;",
                "end for;",
                "read x;",
            ],
            &[
                "var x : int := 3;",
                "var y2k : bool := true;",
                "var CONSTANT_TEST : string := \"test\";",
                "assert(x > 2);",
                "assert(y2k != false);",
                "assert(CONSTANT_TEST = \"test\");",
            ],
            &["var i : int; // := 0;", "//var s : string := \"How many times?\";", "var b : bool := true;"],
            &["var i : int; /* := 0;", "//var s : string := \"How many times?\";*/", "var b : bool := true;"],
        ];

        for (i, lines) in programs.iter().enumerate() {
            if let Err(errors) = parse(lines) {
                panic!("program {i} failed to parse: {errors:?}");
            }
        }
    }

    #[test]
    fn test_parse_declarations() {
        let program = parse(&["var x : int;", "var y :  bool;", "var z :   string;"]).unwrap();
        assert_eq!(program.len(), 3);

        let expected = [("x", VarType::Int), ("y", VarType::Bool), ("z", VarType::Str)];
        for (statement, (expected_name, expected_type)) in program.iter().zip(expected) {
            match &statement.kind {
                StatementKind::VarInit {
                    name,
                    var_type,
                    init,
                } => {
                    assert_eq!(name, expected_name);
                    assert_eq!(*var_type, expected_type);
                    assert!(init.is_none());
                }
                other => panic!("expected declaration, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_statement_kinds() {
        let program = parse(SAMPLE).unwrap();
        assert_eq!(program.len(), 9);

        let kinds: Vec<_> = program
            .iter()
            .map(|s| match s.kind {
                StatementKind::VarInit { .. } => "var",
                StatementKind::Assign { .. } => "assign",
                StatementKind::Read { .. } => "read",
                StatementKind::Print { .. } => "print",
                StatementKind::Assert { .. } => "assert",
                StatementKind::For { .. } => "for",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["var", "var", "print", "read", "var", "assign", "for", "var", "assert"]
        );

        match &program.statements[2].kind {
            StatementKind::Print { value } => {
                assert_eq!(value.kind, ExprKind::Variable("s".to_string()))
            }
            other => panic!("expected print, got {other:?}"),
        }
        match &program.statements[5].kind {
            StatementKind::Assign { name, value } => {
                assert_eq!(name, "x");
                assert_eq!(value.kind, ExprKind::IntLiteral(0));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
        match &program.statements[6].kind {
            StatementKind::For { variable, body, .. } => {
                assert_eq!(variable, "x");
                assert_eq!(body.len(), 2);
            }
            other => panic!("expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse(&[]).unwrap();
        assert!(program.is_empty());
        let program = parse(&["// nothing here"]).unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_missing_assign_is_one_error() {
        let errors = errors(&["var x : int 5;", "print x;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span().map(|s| (s.line, s.column)), Some((1, 13)));
    }

    #[test]
    fn test_missing_assign_keeps_best_effort_tree() {
        let tokens = tokenize(&["var x : int 5;", "print x;"]);
        let (program, errors) = Parser::new(&tokens).parse_recovering();
        assert_eq!(errors.len(), 1);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_missing_semicolon() {
        let errors = errors(&["var x : int := 1", "print x;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ParseError::UnexpectedToken { expected, span, .. } if expected == "';'" && span.line == 2
        ));
    }

    #[test]
    fn test_multiple_errors_in_one_pass() {
        let errors = errors(&["var x : int := ;", "print x", "var y : ;", "y := 1;"]);
        assert_eq!(errors.len(), 3);
        let lines: Vec<_> = errors.iter().filter_map(|e| e.span()).map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 3, 3]);
    }

    #[test]
    fn test_undeclared_variable() {
        let errors = errors(&["x := 1;", "print y;"]);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ParseError::UndeclaredVariable { name, .. } if name == "x"));
        assert!(matches!(&errors[1], ParseError::UndeclaredVariable { name, .. } if name == "y"));
    }

    #[test]
    fn test_redeclaration() {
        let errors = errors(&["var x : int;", "var x : bool;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ParseError::Redeclaration { original_span, duplicate_span, .. }
                if original_span.line == 1 && duplicate_span.line == 2
        ));
    }

    #[test]
    fn test_stray_end() {
        let errors = errors(&["var x : int;", "end for;", "print x;"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::InvalidStatement { .. }));
    }

    #[test]
    fn test_unrecognized_input_in_expression() {
        let tokens = tokenize(&["print @ 5;"]);
        let (program, errors) = Parser::new(&tokens).parse_recovering();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::UnrecognizedInput { text, .. } if text == "@"));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_reparse_is_identical() {
        let tokens = tokenize(SAMPLE);
        let mut parser = Parser::new(&tokens);
        let first = parser.parse().unwrap();
        let second = parser.parse().unwrap();
        assert_eq!(first, second);
        assert!(parser.symbols().exists("nTimes"));
    }
}
