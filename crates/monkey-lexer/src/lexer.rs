//! Lexer for the Monkey programming language.

use crate::token::{lookup_identifier, Token, TokenKind};

/// Lexer tokenizes Monkey source code.
///
/// Tokens are produced one at a time; the caller pulls them with
/// [`Lexer::next_token`] until it sees [`TokenKind::Eof`].
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    next_position: usize,
    ch: char,
}

impl Lexer {
    /// Create a new lexer for the given input.
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            chars: input.chars().collect(),
            position: 0,
            next_position: 0,
            ch: '\0',
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character.
    fn read_char(&mut self) {
        if self.next_position >= self.chars.len() {
            self.ch = '\0';
        } else {
            self.ch = self.chars[self.next_position];
        }
        self.position = self.next_position;
        self.next_position += 1;
    }

    /// Peek at the next character without consuming it.
    fn peek_char(&self) -> char {
        if self.next_position >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.next_position]
        }
    }

    /// Skip whitespace. No token is emitted for it.
    fn skip_whitespace(&mut self) {
        while self.ch == ' ' || self.ch == '\t' || self.ch == '\r' || self.ch == '\n' {
            self.read_char();
        }
    }

    /// Get the next token.
    ///
    /// Never fails: input the lexer does not recognize comes back as an
    /// [`TokenKind::Illegal`] token for the parser to report.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        // EOF
        if self.ch == '\0' {
            return Token::new(TokenKind::Eof, String::new());
        }

        // Identifiers and keywords
        if is_letter(self.ch) {
            return self.read_identifier();
        }

        // Integer literals
        if self.ch.is_ascii_digit() {
            return self.read_number();
        }

        // Operators and punctuation
        if let Some(tok) = self.read_operator() {
            return tok;
        }

        // Unknown character
        let ch = self.ch;
        self.read_char();
        Token::new(TokenKind::Illegal, ch.to_string())
    }

    /// Read an identifier or keyword.
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        let literal: String = self.chars[start..self.position].iter().collect();
        let kind = lookup_identifier(&literal);
        Token::new(kind, literal)
    }

    /// Read a run of decimal digits.
    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        let literal: String = self.chars[start..self.position].iter().collect();
        Token::new(TokenKind::Int, literal)
    }

    /// Read an operator or punctuation token.
    fn read_operator(&mut self) -> Option<Token> {
        let ch = self.ch;
        let next = self.peek_char();

        // Two-character operators
        let two_char = match (ch, next) {
            ('=', '=') => Some((TokenKind::Eq, "==")),
            ('!', '=') => Some((TokenKind::NotEq, "!=")),
            _ => None,
        };

        if let Some((kind, literal)) = two_char {
            self.read_char();
            self.read_char();
            return Some(Token::new(kind, literal.to_string()));
        }

        // Single-character operators
        let single_char = match ch {
            '=' => Some(TokenKind::Assign),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '!' => Some(TokenKind::Bang),
            '*' => Some(TokenKind::Asterisk),
            '/' => Some(TokenKind::Slash),
            '<' => Some(TokenKind::Lt),
            '>' => Some(TokenKind::Gt),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            _ => None,
        };

        if let Some(kind) = single_char {
            self.read_char();
            return Some(Token::new(kind, ch.to_string()));
        }

        None
    }
}

/// Check if a character is a letter (for identifiers).
fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Tokenize an input string into a vector of tokens, Eof included.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
    }
    tokens
}
