//! Pratt parser for Monkey.

use crate::ast::*;
use crate::precedence::Precedence;
use monkey_lexer::{Lexer, Token, TokenKind};
use thiserror::Error;

/// Diagnostics recorded while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    #[error("could not parse {literal:?} as integer")]
    IntegerOutOfRange { literal: String },
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expr>;
type InfixParseFn = fn(&mut Parser, Expr) -> Option<Expr>;

/// Pratt parser for Monkey source code.
///
/// The parser keeps two tokens of context (current + peek) and accumulates
/// diagnostics instead of stopping at the first malformed statement. A failed
/// statement contributes no AST node; parsing resumes at the next token.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParserError>,
}

impl Parser {
    /// Create a new parser for the given lexer.
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advance if the peek token has the expected kind, else record an error.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, kind: TokenKind) {
        self.errors.push(ParserError::UnexpectedToken {
            expected: kind,
            found: self.peek_token.kind,
        });
    }

    fn no_prefix_parse_fn_error(&mut self, kind: TokenKind) {
        self.errors.push(ParserError::NoPrefixParseFn(kind));
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::from_token(self.cur_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::from_token(self.peek_token.kind)
    }

    /// Parse the entire program.
    ///
    /// Always returns a [`Program`]; malformed input degrades to a shorter
    /// statement list plus entries in [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cur_token_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Diagnostics recorded so far, in source order.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Consume the parser and return its accumulated diagnostics.
    pub fn into_errors(self) -> Vec<ParserError> {
        self.errors
    }

    // =========================================================================
    // Statement Parsing
    // =========================================================================

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Ident {
            name: self.cur_token.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token(); // consume '='

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Let(LetStmt { name, value }))
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        self.next_token(); // consume 'return'

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Return(ReturnStmt { value }))
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Expr(expr))
    }

    // =========================================================================
    // Expression Parsing
    // =========================================================================

    /// Parse an expression with the given minimum binding power.
    ///
    /// The loop keeps absorbing infix operators from the peek position while
    /// they bind tighter than `precedence`; each handler leaves `cur_token`
    /// on the last token of what it produced.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let Some(prefix_fn) = self.get_prefix_fn(self.cur_token.kind) else {
            self.no_prefix_parse_fn_error(self.cur_token.kind);
            return None;
        };

        let mut left = prefix_fn(self)?;

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix_fn) = self.get_infix_fn(self.peek_token.kind) else {
                return Some(left);
            };
            self.next_token();
            left = infix_fn(self, left)?;
        }

        Some(left)
    }

    fn get_prefix_fn(&self, kind: TokenKind) -> Option<PrefixParseFn> {
        match kind {
            TokenKind::Ident => Some(Parser::parse_ident),
            TokenKind::Int => Some(Parser::parse_int),
            TokenKind::Bang | TokenKind::Minus => Some(Parser::parse_prefix),
            _ => None,
        }
    }

    fn get_infix_fn(&self, kind: TokenKind) -> Option<InfixParseFn> {
        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt => Some(Parser::parse_infix),
            _ => None,
        }
    }

    // =========================================================================
    // Prefix and Infix Handlers
    // =========================================================================

    fn parse_ident(&mut self) -> Option<Expr> {
        Some(Expr::Ident(Ident {
            name: self.cur_token.literal.clone(),
        }))
    }

    fn parse_int(&mut self) -> Option<Expr> {
        let literal = self.cur_token.literal.clone();
        let Ok(value) = literal.parse::<i64>() else {
            self.errors.push(ParserError::IntegerOutOfRange { literal });
            return None;
        };
        Some(Expr::Int(IntLit { literal, value }))
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        let op = self.cur_token.literal.clone();
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expr::Prefix(Box::new(PrefixExpr { op, right })))
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        let op = self.cur_token.literal.clone();
        let precedence = self.cur_precedence();
        self.next_token();

        // Parsing the right side at the operator's own precedence makes
        // operators of equal precedence group to the left.
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix(Box::new(InfixExpr { left, op, right })))
    }
}

/// Everything a parse produces: the program plus its diagnostics.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub program: Program,
    pub errors: Vec<ParserError>,
}

impl ParseOutcome {
    /// True when parsing recorded no diagnostics.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse source code into an AST.
pub fn parse(source: &str) -> ParseOutcome {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    ParseOutcome {
        program,
        errors: parser.into_errors(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let outcome = parse(source);
        assert!(
            outcome.errors.is_empty(),
            "parse errors for {:?}: {:?}",
            source,
            outcome.errors
        );
        outcome.program
    }

    fn parse_expr(source: &str) -> Expr {
        let program = parse_ok(source);
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::Expr(expr) => expr.clone(),
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    // =========================================================================
    // Statement Tests
    // =========================================================================

    #[test]
    fn test_let_statements() {
        let tests = [
            ("let x = 5;", "x", 5),
            ("let y = 10;", "y", 10),
            ("let foobar = 100030404;", "foobar", 100030404),
        ];

        for (input, expected_name, expected_value) in tests {
            let program = parse_ok(input);
            assert_eq!(program.statements.len(), 1);

            let Stmt::Let(stmt) = &program.statements[0] else {
                panic!("expected let statement, got {:?}", program.statements[0]);
            };
            assert_eq!(stmt.token_literal(), "let");
            assert_eq!(stmt.name.name, expected_name);
            assert!(
                matches!(&stmt.value, Expr::Int(IntLit { value, .. }) if *value == expected_value)
            );
        }
    }

    #[test]
    fn test_let_statement_names_in_order() {
        let program = parse_ok("let x = 5; let y = 10; let foobar = 100030404;");
        assert_eq!(program.statements.len(), 3);

        let expected = ["x", "y", "foobar"];
        for (stmt, name) in program.statements.iter().zip(expected) {
            let Stmt::Let(stmt) = stmt else {
                panic!("expected let statement, got {:?}", stmt);
            };
            assert_eq!(stmt.name.name, name);
        }
    }

    #[test]
    fn test_let_statement_binds_expression() {
        let program = parse_ok("let myVar = anotherVar;");
        let Stmt::Let(stmt) = &program.statements[0] else {
            panic!("expected let statement");
        };
        assert!(matches!(&stmt.value, Expr::Ident(Ident { name }) if name == "anotherVar"));
    }

    #[test]
    fn test_return_statements() {
        let program = parse_ok("return 5; return 10; return 23234;");
        assert_eq!(program.statements.len(), 3);

        let expected = [5, 10, 23234];
        for (stmt, value) in program.statements.iter().zip(expected) {
            assert_eq!(stmt.token_literal(), "return");
            let Stmt::Return(stmt) = stmt else {
                panic!("expected return statement, got {:?}", stmt);
            };
            assert!(matches!(&stmt.value, Expr::Int(IntLit { value: v, .. }) if *v == value));
        }
    }

    #[test]
    fn test_mixed_statement_kinds() {
        let program = parse_ok("let x = 5; x + 10; return x;");
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(program.statements[0], Stmt::Let(_)));
        assert!(matches!(program.statements[1], Stmt::Expr(_)));
        assert!(matches!(program.statements[2], Stmt::Return(_)));
    }

    #[test]
    fn test_semicolons_are_optional() {
        let expr = parse_expr("a + b");
        assert_eq!(expr.to_string(), "(a + b)");

        let program = parse_ok("let x = 5");
        assert!(matches!(&program.statements[0], Stmt::Let(_)));
    }

    #[test]
    fn test_empty_input() {
        let program = parse_ok("");
        assert!(program.statements.is_empty());
        assert_eq!(program.to_string(), "");
        assert_eq!(program.token_literal(), "");
    }

    // =========================================================================
    // Expression Tests
    // =========================================================================

    #[test]
    fn test_identifier_expression() {
        let expr = parse_expr("foobar;");
        assert!(matches!(&expr, Expr::Ident(Ident { name }) if name == "foobar"));
        assert_eq!(expr.token_literal(), "foobar");
    }

    #[test]
    fn test_integer_literal_expression() {
        let expr = parse_expr("5;");
        let Expr::Int(int) = &expr else {
            panic!("expected integer literal, got {:?}", expr);
        };
        assert_eq!(int.value, 5);
        assert_eq!(int.literal, "5");
    }

    #[test]
    fn test_prefix_expressions() {
        let tests = [("!5;", "!", 5), ("-15;", "-", 15)];

        for (input, op, value) in tests {
            let expr = parse_expr(input);
            let Expr::Prefix(prefix) = &expr else {
                panic!("expected prefix expression, got {:?}", expr);
            };
            assert_eq!(prefix.op, op);
            assert!(matches!(&prefix.right, Expr::Int(IntLit { value: v, .. }) if *v == value));
        }
    }

    #[test]
    fn test_infix_expressions() {
        let tests = [
            ("5 + 5;", "+"),
            ("5 - 5;", "-"),
            ("5 * 5;", "*"),
            ("5 / 5;", "/"),
            ("5 > 5;", ">"),
            ("5 < 5;", "<"),
            ("5 == 5;", "=="),
            ("5 != 5;", "!="),
        ];

        for (input, op) in tests {
            let expr = parse_expr(input);
            let Expr::Infix(infix) = &expr else {
                panic!("expected infix expression, got {:?}", expr);
            };
            assert_eq!(infix.op, op);
            assert!(matches!(&infix.left, Expr::Int(IntLit { value: 5, .. })));
            assert!(matches!(&infix.right, Expr::Int(IntLit { value: 5, .. })));
        }
    }

    // =========================================================================
    // Precedence Tests
    // =========================================================================

    #[test]
    fn test_operator_precedence() {
        let tests = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
        ];

        for (input, expected) in tests {
            let program = parse_ok(input);
            assert_eq!(program.to_string(), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_program_display_round_trip() {
        let program = parse_ok("let myVar = anotherVar;");
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_reparse_of_rendering_is_stable() {
        let tests = [
            "let myVar = anotherVar;",
            "return 5;",
            "foobar;",
            "42",
            "let x = 5; let y = 10;",
        ];

        for input in tests {
            let first = parse_ok(input).to_string();
            let second = parse_ok(&first).to_string();
            assert_eq!(first, second, "input: {:?}", input);
        }
    }

    // =========================================================================
    // Error Tests
    // =========================================================================

    #[test]
    fn test_let_missing_assign() {
        let outcome = parse("let x 5;");
        assert!(!outcome.is_ok());
        assert_eq!(
            outcome.errors[0].to_string(),
            "expected next token to be =, got INT instead"
        );
    }

    #[test]
    fn test_let_missing_identifier() {
        let outcome = parse("let = 5;");
        assert!(!outcome.is_ok());
        assert_eq!(
            outcome.errors[0].to_string(),
            "expected next token to be IDENT, got = instead"
        );
    }

    #[test]
    fn test_no_prefix_parse_fn_error() {
        let outcome = parse("+5;");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            outcome.errors[0].to_string(),
            "no prefix parse function for + found"
        );
        // Recovery resumes at the next token, so the 5 still parses.
        assert_eq!(outcome.program.statements.len(), 1);
    }

    #[test]
    fn test_illegal_token_reported() {
        let outcome = parse("@");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0], ParserError::NoPrefixParseFn(TokenKind::Illegal));
        assert_eq!(
            outcome.errors[0].to_string(),
            "no prefix parse function for ILLEGAL found"
        );
        assert!(outcome.program.statements.is_empty());
    }

    #[test]
    fn test_integer_literal_out_of_range() {
        let outcome = parse("9999999999999999999999");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            outcome.errors[0].to_string(),
            "could not parse \"9999999999999999999999\" as integer"
        );
        assert!(outcome.program.statements.is_empty());
    }

    #[test]
    fn test_return_without_value_is_an_error() {
        let outcome = parse("return;");
        assert!(outcome.program.statements.is_empty());
        assert_eq!(
            outcome.errors[0].to_string(),
            "no prefix parse function for ; found"
        );
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let outcome = parse("let x 5; let = 10; let 838383;");

        let messages: Vec<String> = outcome.errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "expected next token to be =, got INT instead",
                "expected next token to be IDENT, got = instead",
                "no prefix parse function for = found",
                "expected next token to be IDENT, got INT instead",
            ]
        );
        // The integer literals after each failed let still parse on recovery.
        assert_eq!(outcome.program.statements.len(), 3);
    }

    #[test]
    fn test_parser_level_interface() {
        let lexer = Lexer::new("let x = 5;");
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty());
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_outcome_is_ok() {
        assert!(parse("let x = 5;").is_ok());
        assert!(!parse("let x 5;").is_ok());
    }
}
