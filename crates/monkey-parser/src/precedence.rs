//! Operator precedence levels for Pratt parsing.

use monkey_lexer::TokenKind;

/// Precedence levels (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    Lowest = 1,
    Equals = 2,      // == !=
    LessGreater = 3, // > <
    Sum = 4,         // + -
    Product = 5,     // * /
    Prefix = 6,      // -X !X
    Call = 7,        // reserved for call expressions
}

impl Precedence {
    /// Get the precedence for a token kind.
    pub fn from_token(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}
