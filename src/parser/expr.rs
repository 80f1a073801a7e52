use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// On entry `current` is the expression's first token; on return it is the last.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let expr = parse_expr_inner(parser, bp);
    parser.leave_nesting();
    expr
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParseFn { kind: token_kind },
            parser.get_position(),
        ));
    };

    let mut left = nud(parser)?;

    // While the lookahead binds tighter than bp, fold it into lhs
    while !parser.peek_token().is(TokenKind::Semicolon) && bp < parser.peek_precedence() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.advance();
        left = led(parser, left)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &Parser) -> Identifier {
    let token = parser.current_token().clone();
    Identifier {
        value: token.literal.clone(),
        span: token.span.clone(),
        token,
    }
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Identifier(parse_identifier(parser)))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let value = token.literal.parse::<i64>().map_err(|_| {
        Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.literal.clone(),
            },
            token.span.start.clone(),
        )
    })?;

    Ok(Expr::Integer(IntegerLiteral {
        value,
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Boolean(BooleanLiteral {
        value: token.is(TokenKind::True),
        span: token.span.clone(),
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: parser.span_from(&operator_token.span),
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    let bp = parser.current_precedence();
    parser.advance();

    // Same bp on the right keeps equal-precedence operators left associative
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        span: parser.span_from(left.get_span()),
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // if (<condition>) { ... } else { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::LParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::RParen)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.peek_token().is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        span: parser.span_from(&token.span),
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // fn(<parameters>) { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = parse_block(parser)?;

    Ok(Expr::Function(FunctionLiteral {
        span: parser.span_from(&token.span),
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = vec![];

    if parser.peek_token().is(TokenKind::RParen) {
        parser.advance();
        return Ok(parameters);
    }

    parser.expect_peek(TokenKind::Ident)?;
    parameters.push(parse_identifier(parser));

    while parser.peek_token().is(TokenKind::Comma) {
        parser.advance();
        parser.expect_peek(TokenKind::Ident)?;
        parameters.push(parse_identifier(parser));
    }

    parser.expect_peek(TokenKind::RParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, function: Expr) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(function.get_span()),
        token,
        function: Box::new(function),
        arguments,
    }))
}

fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![];

    if parser.peek_token().is(TokenKind::RParen) {
        parser.advance();
        return Ok(args);
    }

    parser.advance();
    args.push(parse_expr(parser, BindingPower::Default)?);

    while parser.peek_token().is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        args.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_peek(TokenKind::RParen)?;

    Ok(args)
}
