//! Monkey parser - AST construction for the Monkey programming language.
//!
//! This crate provides the parser for Monkey, which converts tokens into an AST.
//!
//! # Example
//!
//! ```
//! use monkey_parser::parse;
//!
//! let outcome = parse("let x = 1 + 2 * 3;");
//! assert!(outcome.is_ok());
//! assert_eq!(outcome.program.to_string(), "let x = (1 + (2 * 3));");
//! ```

pub mod ast;
pub mod parser;
pub mod precedence;

pub use ast::*;
pub use parser::{parse, ParseOutcome, Parser, ParserError};
pub use precedence::Precedence;
