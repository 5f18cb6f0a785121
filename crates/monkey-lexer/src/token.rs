//! Token types for the Monkey lexer.

use std::fmt;

/// Token kinds for the Monkey language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    If,
    Else,
    Return,
    True,
    False,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "fn",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
        };
        write!(f, "{}", s)
    }
}

/// Look up an identifier to see if it's a keyword.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    match ident {
        "fn" => TokenKind::Function,
        "let" => TokenKind::Let,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => TokenKind::Ident,
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The literal string value.
    pub literal: String,
}

impl Token {
    /// Create a new Token.
    pub fn new(kind: TokenKind, literal: String) -> Self {
        Self { kind, literal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_identifier() {
        assert_eq!(lookup_identifier("fn"), TokenKind::Function);
        assert_eq!(lookup_identifier("let"), TokenKind::Let);
        assert_eq!(lookup_identifier("if"), TokenKind::If);
        assert_eq!(lookup_identifier("else"), TokenKind::Else);
        assert_eq!(lookup_identifier("return"), TokenKind::Return);
        assert_eq!(lookup_identifier("true"), TokenKind::True);
        assert_eq!(lookup_identifier("false"), TokenKind::False);
        assert_eq!(lookup_identifier("foo"), TokenKind::Ident);
        assert_eq!(lookup_identifier("lets"), TokenKind::Ident);
        assert_eq!(lookup_identifier("Function"), TokenKind::Ident);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Assign.to_string(), "=");
        assert_eq!(TokenKind::Eq.to_string(), "==");
        assert_eq!(TokenKind::NotEq.to_string(), "!=");
        assert_eq!(TokenKind::Ident.to_string(), "IDENT");
        assert_eq!(TokenKind::Int.to_string(), "INT");
        assert_eq!(TokenKind::Illegal.to_string(), "ILLEGAL");
        assert_eq!(TokenKind::Let.to_string(), "let");
    }
}
