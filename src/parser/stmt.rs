use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_identifier},
        lookups::BindingPower,
    },
};

use super::parser::Parser;

/// Parses one statement starting at `current`, leaving `current` on its last token.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

/// Consumes a trailing `;` if there is one. Terminators are optional.
fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_token().is(TokenKind::Semicolon) {
        parser.advance();
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Ident)?;
    let name = parse_identifier(parser);

    parser.expect_peek(TokenKind::Assign)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Let(LetStmt {
        span: parser.span_from(&token.span),
        token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let peek = parser.peek_token();
    if peek.is_one_of_many(&[TokenKind::Semicolon, TokenKind::RBrace, TokenKind::EOF]) {
        return Err(Error::new(
            ErrorImpl::MissingReturnValue { found: peek.kind },
            peek.span.start.clone(),
        ));
    }

    parser.advance();
    let return_value = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Return(ReturnStmt {
        span: parser.span_from(&token.span),
        token,
        return_value,
    }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let expression = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Expression(ExpressionStmt {
        span: parser.span_from(&token.span),
        token,
        expression,
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// Parses `{ ... }` with `current` on the `{`, leaving `current` on the `}`.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.enter_nesting()?;
    let block = parse_block_inner(parser);
    parser.leave_nesting();
    block
}

fn parse_block_inner(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut statements = Vec::new();
    while !parser.current_token().is_one_of_many(&[TokenKind::RBrace, TokenKind::EOF]) {
        trace!(kind = %parser.current_token_kind(), "parsing block statement");
        statements.push(parse_stmt(parser)?);
        parser.advance();
    }

    if parser.current_token().is(TokenKind::EOF) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::RBrace,
                found: TokenKind::EOF,
            },
            parser.get_position(),
        ));
    }

    Ok(BlockStmt {
        span: parser.span_from(&token.span),
        token,
        statements,
    })
}
