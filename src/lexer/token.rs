//! Token definitions for the Mini-PL lexer.
//!
//! This module defines all tokens recognized by the lexer:
//! - Type names (`int`, `bool`, `string`)
//! - Reserved keywords and punctuation (`var`, `for`, `:=`, `..`, ...)
//! - Operators (`+`, `<=`, `&`, `!`, ...)
//! - Literals (integers, booleans, strings) with their decoded values
//! - Identifiers
//!
//! ## Design Notes
//!
//! We use the `logos` crate for lexical analysis. Logos generates a fast,
//! table-driven lexer from token definitions using procedural macros.
//! Matching is longest-match first, so `:=` wins over `:` and `integer` is an
//! identifier rather than `int` followed by `eger`.
//!
//! Mini-PL is case-sensitive: `Var` is an identifier, not a keyword.

use logos::{Logos, Skip};
use std::fmt;

use crate::ast::Span;

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// 1-based source line
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
    /// The original text of the token (raw lexeme, escapes not decoded)
    pub text: String,
}

impl Token {
    /// Create a new token with the given kind, position, and text.
    pub fn new(kind: TokenKind, line: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            text: text.into(),
        }
    }

    /// The source span covered by this token.
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column, self.text.chars().count())
    }
}

/// All possible token types in Mini-PL.
///
/// Literal variants carry their decoded value; the raw lexeme is kept on
/// [`Token::text`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // ==================== Types ====================

    /// `int`
    #[token("int")]
    Int,

    /// `bool`
    #[token("bool")]
    Bool,

    /// `string`
    #[token("string")]
    StringType,

    // ==================== Keywords ====================

    /// `var` - begins a declaration
    #[token("var")]
    Var,

    /// `for` - begins a loop, also closes it in `end for`
    #[token("for")]
    For,

    /// `in` - separates the loop variable from its range
    #[token("in")]
    In,

    /// `do` - begins the loop body
    #[token("do")]
    Do,

    /// `end` - ends the loop body
    #[token("end")]
    End,

    /// `read`
    #[token("read")]
    Read,

    /// `print`
    #[token("print")]
    Print,

    /// `assert`
    #[token("assert")]
    Assert,

    // ==================== Punctuation ====================

    /// `:=`
    #[token(":=")]
    Assign,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `..`
    #[token("..")]
    Range,

    /// `(`
    #[token("(")]
    LeftParen,

    /// `)`
    #[token(")")]
    RightParen,

    // ==================== Operators ====================

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `<`
    #[token("<")]
    Less,

    /// `>`
    #[token(">")]
    Greater,

    /// `<=`
    #[token("<=")]
    LessEqual,

    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// `=`
    #[token("=")]
    Equals,

    /// `!=`
    #[token("!=")]
    NotEqual,

    /// `&`
    #[token("&")]
    Ampersand,

    /// `!` - only valid in front of a boolean literal
    #[token("!")]
    Not,

    // ==================== Literals ====================

    /// Integer literal. The scanner never folds a leading `-` into it.
    /// Literals that do not fit in `i64` are rejected as unrecognized input.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLiteral(i64),

    /// `true` or `false`
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    BoolLiteral(bool),

    /// String literal, never spanning lines. Holds the decoded content.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, string_literal)]
    StringLiteral(String),

    // ==================== Identifiers ====================

    /// Identifier: a letter followed by letters, digits or underscores
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,

    // ==================== Special Tokens ====================

    /// Line comment, up to the end of the line
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    /// Block comment; the callback skips it, possibly across lines
    #[token("/*", block_comment)]
    BlockComment,

    /// A run of unrecognized characters. Produced by [`super::Lexer`], never
    /// by the generated state machine.
    Error,
}

/// Broad token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Keyword,
    Operator,
    Identifier,
    IntLiteral,
    BoolLiteral,
    StringLiteral,
    Error,
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Keyword => "keyword",
            TokenClass::Operator => "operator",
            TokenClass::Identifier => "identifier",
            TokenClass::IntLiteral => "integer literal",
            TokenClass::BoolLiteral => "boolean literal",
            TokenClass::StringLiteral => "string literal",
            TokenClass::Error => "unrecognized input",
        };
        f.write_str(name)
    }
}

impl TokenKind {
    /// The category this token belongs to.
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual
            | TokenKind::Equals
            | TokenKind::NotEqual
            | TokenKind::Ampersand
            | TokenKind::Not
            | TokenKind::LeftParen
            | TokenKind::RightParen => TokenClass::Operator,
            TokenKind::IntLiteral(_) => TokenClass::IntLiteral,
            TokenKind::BoolLiteral(_) => TokenClass::BoolLiteral,
            TokenKind::StringLiteral(_) => TokenClass::StringLiteral,
            TokenKind::Identifier => TokenClass::Identifier,
            TokenKind::Error | TokenKind::LineComment | TokenKind::BlockComment => {
                TokenClass::Error
            }
            _ => TokenClass::Keyword,
        }
    }

    /// Returns true for tokens that can begin a statement.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::For
                | TokenKind::Read
                | TokenKind::Print
                | TokenKind::Assert
                | TokenKind::Identifier
        )
    }

    /// Returns true for tokens that can begin an operand.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral(_)
                | TokenKind::BoolLiteral(_)
                | TokenKind::StringLiteral(_)
                | TokenKind::Identifier
                | TokenKind::LeftParen
                | TokenKind::Not
        )
    }

    /// Returns true for the binary operators of the `op` production.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
                | TokenKind::Equals
                | TokenKind::NotEqual
                | TokenKind::Ampersand
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Bool => write!(f, "'bool'"),
            TokenKind::StringType => write!(f, "'string'"),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::In => write!(f, "'in'"),
            TokenKind::Do => write!(f, "'do'"),
            TokenKind::End => write!(f, "'end'"),
            TokenKind::Read => write!(f, "'read'"),
            TokenKind::Print => write!(f, "'print'"),
            TokenKind::Assert => write!(f, "'assert'"),
            TokenKind::Assign => write!(f, "':='"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Range => write!(f, "'..'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::NotEqual => write!(f, "'!='"),
            TokenKind::Ampersand => write!(f, "'&'"),
            TokenKind::Not => write!(f, "'!'"),
            TokenKind::IntLiteral(value) => write!(f, "integer {value}"),
            TokenKind::BoolLiteral(value) => write!(f, "boolean {value}"),
            TokenKind::StringLiteral(_) => write!(f, "string literal"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::LineComment | TokenKind::BlockComment => write!(f, "comment"),
            TokenKind::Error => write!(f, "unrecognized input"),
        }
    }
}

/// Skips a block comment. An unterminated comment runs to the end of input.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    Skip
}

/// Decodes the content of a string literal (the lexeme minus its quotes).
fn string_literal(lex: &mut logos::Lexer<TokenKind>) -> String {
    let raw = lex.slice();
    unescape(&raw[1..raw.len() - 1])
}

/// Decodes escapes in string literal content.
///
/// `\"` becomes `"` and `\\` becomes `\`. Any other escape, such as `\n`,
/// is kept verbatim as a backslash followed by the character.
pub fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
