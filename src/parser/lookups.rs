use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first. Comparisons rely on the derived `PartialOrd`.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.led(TokenKind::Eq, BindingPower::Equality, parse_infix_expr);
    parser.led(TokenKind::NotEq, BindingPower::Equality, parse_infix_expr);
    parser.led(TokenKind::Lt, BindingPower::Relational, parse_infix_expr);
    parser.led(TokenKind::Gt, BindingPower::Relational, parse_infix_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Asterisk, BindingPower::Multiplicative, parse_infix_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_infix_expr);

    parser.led(TokenKind::LParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Ident, parse_identifier_expr);
    parser.nud(TokenKind::Int, parse_integer_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::LParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Function, parse_function_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::LBrace, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
