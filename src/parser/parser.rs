//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the statement loop.
//! The parser pulls tokens from a [`Lexer`] one at a time, keeping the
//! current token and one token of lookahead, and dispatches through
//! lookup tables keyed by token kind:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors never abort the parse. Each failed statement leaves one
//! diagnostic behind and the parser skips to the next statement boundary.

use std::{collections::HashMap, mem};

use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Maximum nesting depth for expressions and blocks before the parser bails out.
///
/// Keeps pathological input such as `((((...))))` from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Tunable limits for a parse run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest expression/block nesting accepted before reporting `NestingTooDeep`.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// A parser is single-use: it consumes its lexer to the end in
/// [`Parser::parse_program`].
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The token last consumed
    current: Token,
    /// One token of lookahead, already fetched from the lexer
    peek: Token,
    /// Accumulated diagnostics, in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    config: ParserConfig,
    /// Current expression/block nesting depth
    nesting_depth: usize,
    /// Number of `{` consumed but not yet closed, used when recovering
    brace_depth: usize,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`, with the default [`ParserConfig`].
    pub fn new(lexer: Lexer) -> Self {
        Parser::with_config(lexer, ParserConfig::default())
    }

    /// Creates a new Parser with explicit limits.
    ///
    /// Registers every handler and primes `current` and `peek` with the first two tokens.
    pub fn with_config(mut lexer: Lexer, config: ParserConfig) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            config,
            nesting_depth: 0,
            brace_depth: 0,
        };
        parser.track_braces();
        create_token_lookups(&mut parser);
        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Always returns a program; check [`Parser::errors`] afterwards, since the
    /// tree says nothing about statements that failed to parse.
    pub fn parse_program(&mut self) -> Program {
        let start = self.current.span.start.clone();
        let mut statements = vec![];

        while !self.current.is(TokenKind::EOF) {
            trace!(kind = %self.current.kind, offset = self.current.span.start.0, "parsing statement");

            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    debug!(%error, offset = error.get_position().0, "syntax error");
                    self.errors.push(error);
                    self.synchronize();
                }
            }

            self.advance();
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Program {
            statements,
            span: Span {
                start,
                end: self.current.span.end.clone(),
            },
        }
    }

    /// Diagnostic messages in the order they were found. Empty means no defects.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Diagnostics with their kinds and positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts `peek` into `current` and pulls a fresh lookahead from the lexer.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = mem::replace(&mut self.peek, next);
        self.track_braces();
    }

    /// Advances if the lookahead is `expected_kind`, otherwise reports what was found instead.
    ///
    /// # Returns
    ///
    /// Returns Ok(()) with `current` now on the expected token, otherwise an
    /// `UnexpectedToken` error positioned at the lookahead.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek.is(expected_kind) {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek.kind,
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    /// Binding power of the lookahead, `Default` if it is not an infix operator.
    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek.kind)
    }

    /// Binding power of the current token, `Default` if it is not an infix operator.
    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Increments the nesting depth, failing with `NestingTooDeep` past the configured
    /// maximum. Pair every `Ok` with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.nesting_depth >= self.config.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    max: self.config.max_nesting_depth,
                },
                self.get_position(),
            ));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Span from the start of `start` to the end of the current token.
    pub fn span_from(&self, start: &Span) -> Span {
        Span {
            start: start.start.clone(),
            end: self.current.span.end.clone(),
        }
    }

    fn track_braces(&mut self) {
        match self.current.kind {
            TokenKind::LBrace => self.brace_depth += 1,
            TokenKind::RBrace => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Skips to the token that ends the failed statement: a `;` outside any block,
    /// the `}` closing the outermost open block (plus a `;` right after it), or `EOF`.
    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::EOF => break,
                TokenKind::Semicolon if self.brace_depth == 0 => break,
                TokenKind::RBrace if self.brace_depth == 0 => {
                    if self.peek.is(TokenKind::Semicolon) {
                        self.advance();
                    }
                    break;
                }
                _ => self.advance(),
            }
        }
        trace!(offset = self.current.span.start.0, "recovered at statement boundary");
    }
}

/// Parses `source` into a program.
///
/// This is the main entry point for parsing. It creates a lexer and parser,
/// then parses all statements until EOF.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - Label used in positions, `"shell"` when `None`
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the accumulated diagnostics
/// - The parsed Program
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::with_file(source, file));
    let program = parser.parse_program();
    (parser, program)
}
