//! Monkey lexer - tokenization for the Monkey programming language.
//!
//! This crate provides the lexer for Monkey, which converts source code into tokens
//! for parsing.
//!
//! # Example
//!
//! ```
//! use monkey_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("let x = 42;");
//! let token = lexer.next_token();
//! assert_eq!(token.kind, TokenKind::Let);
//! assert_eq!(token.literal, "let");
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{lookup_identifier, Token, TokenKind};
