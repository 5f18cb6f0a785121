//! AST node types for the Monkey parser.
//!
//! Every node can reproduce the literal text of the token that anchors it
//! (via [`Node::token_literal`]) and render itself back to canonical source
//! text (via `Display`). Rendered expressions are fully parenthesized, which
//! is what the parser tests lean on to pin down precedence.

use std::fmt;

/// Base trait for all AST nodes.
pub trait Node: fmt::Display {
    /// The literal text of the token this node is anchored to.
    fn token_literal(&self) -> &str;
}

// ============================================================================
// Expressions
// ============================================================================

/// Expression node enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(Ident),
    Int(IntLit),
    Prefix(Box<PrefixExpr>),
    Infix(Box<InfixExpr>),
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Ident(e) => e.token_literal(),
            Expr::Int(e) => e.token_literal(),
            Expr::Prefix(e) => e.token_literal(),
            Expr::Infix(e) => e.token_literal(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(e) => write!(f, "{}", e),
            Expr::Int(e) => write!(f, "{}", e),
            Expr::Prefix(e) => write!(f, "{}", e),
            Expr::Infix(e) => write!(f, "{}", e),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Statement node enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expr(Expr),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(s) => s.token_literal(),
            Stmt::Return(s) => s.token_literal(),
            Stmt::Expr(e) => e.token_literal(),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(s) => write!(f, "{}", s),
            Stmt::Return(s) => write!(f, "{}", s),
            Stmt::Expr(e) => write!(f, "{}", e),
        }
    }
}

// ============================================================================
// Program
// ============================================================================

/// The AST root: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

// ============================================================================
// Expression Nodes
// ============================================================================

/// An identifier such as a variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Node for Ident {
    fn token_literal(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An integer literal. Keeps the exact source digits alongside the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLit {
    pub literal: String,
    pub value: i64,
}

impl Node for IntLit {
    fn token_literal(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for IntLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

/// A prefix operator expression such as `!ok` or `-5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpr {
    pub op: String,
    pub right: Expr,
}

impl Node for PrefixExpr {
    fn token_literal(&self) -> &str {
        &self.op
    }
}

impl fmt::Display for PrefixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op, self.right)
    }
}

/// A binary operator expression such as `a + b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixExpr {
    pub left: Expr,
    pub op: String,
    pub right: Expr,
}

impl Node for InfixExpr {
    fn token_literal(&self) -> &str {
        &self.op
    }
}

impl fmt::Display for InfixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

// ============================================================================
// Statement Nodes
// ============================================================================

/// A `let` binding: `let name = value;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStmt {
    pub name: Ident,
    pub value: Expr,
}

impl Node for LetStmt {
    fn token_literal(&self) -> &str {
        "let"
    }
}

impl fmt::Display for LetStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

/// A `return` statement: `return value;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    pub value: Expr,
}

impl Node for ReturnStmt {
    fn token_literal(&self) -> &str {
        "return"
    }
}

impl fmt::Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "return {};", self.value)
    }
}
