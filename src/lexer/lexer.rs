use std::sync::Arc;

use crate::{MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_ident, Token, TokenKind};

/// Sentinel held in `ch` once the cursor has run off the end of the input.
const EOF_CHAR: char = '\0';

/// Pull-based scanner producing one token per call to [`Lexer::next_token`].
///
/// `position` is the byte offset of `ch`, `read_position` the offset of the
/// character after it. Only one character of lookahead (`peek_char`) is ever used.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: char,
    file: Arc<str>,
}

impl Lexer {
    pub fn new(input: String) -> Lexer {
        Lexer::with_file(input, None)
    }

    pub fn with_file(input: String, file: Option<String>) -> Lexer {
        let file: Arc<str> = match file {
            Some(file) => Arc::from(file),
            None => Arc::from("shell"),
        };

        let mut lexer = Lexer {
            input,
            position: 0,
            read_position: 0,
            ch: EOF_CHAR,
            file,
        };
        lexer.read_char();
        lexer
    }

    /// The label positions produced by this lexer refer to.
    pub fn file(&self) -> &Arc<str> {
        &self.file
    }

    /// Scans and returns the next token. Keeps returning `EOF` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;

        let ch = self.ch;
        let kind = match ch {
            '=' if self.peek_char() == '=' => {
                self.read_char();
                TokenKind::Eq
            }
            '!' if self.peek_char() == '=' => {
                self.read_char();
                TokenKind::NotEq
            }
            '=' => TokenKind::Assign,
            '!' => TokenKind::Bang,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            EOF_CHAR if self.at_eof() => {
                return MK_TOKEN!(TokenKind::EOF, String::new(), MK_SPAN!(start, start, self.file));
            }
            c if is_letter(c) => {
                let word = self.read_while(is_identifier_char);
                return MK_TOKEN!(
                    lookup_ident(&word),
                    word,
                    MK_SPAN!(start, self.position, self.file)
                );
            }
            c if c.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                return MK_TOKEN!(
                    TokenKind::Int,
                    digits,
                    MK_SPAN!(start, self.position, self.file)
                );
            }
            _ => TokenKind::Illegal,
        };

        let token = MK_TOKEN!(
            kind,
            self.input[start..self.read_position].to_string(),
            MK_SPAN!(start, self.read_position, self.file)
        );
        self.read_char();
        token
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_char(&mut self) {
        self.position = self.read_position.min(self.input.len());
        match self
            .input
            .get(self.read_position..)
            .and_then(|rest| rest.chars().next())
        {
            Some(c) => {
                self.ch = c;
                self.read_position += c.len_utf8();
            }
            None => {
                self.ch = EOF_CHAR;
                self.read_position = self.input.len() + 1;
            }
        }
    }

    fn peek_char(&self) -> char {
        self.input
            .get(self.read_position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(EOF_CHAR)
    }

    /// Consumes a maximal run of characters matching `pred`, starting at `ch`.
    fn read_while(&mut self, pred: fn(char) -> bool) -> String {
        let start = self.position;
        while !self.at_eof() && pred(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit()
}

/// Lexes `source` up to and including the first `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::with_file(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
