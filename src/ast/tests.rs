//! Unit tests for AST rendering and token literals.

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    ast::{Expr, Program, Stmt},
    expressions::{CallExpr, FunctionLiteral, Identifier, InfixExpr, IntegerLiteral, PrefixExpr},
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

fn null_span() -> Span {
    Span {
        start: Position::null(),
        end: Position::null(),
    }
}

fn token(kind: TokenKind, literal: &str) -> Token {
    MK_TOKEN!(kind, literal.to_string(), null_span())
}

fn ident(name: &str) -> Identifier {
    Identifier {
        token: token(TokenKind::Ident, name),
        value: name.to_string(),
        span: null_span(),
    }
}

fn int(value: i64) -> Expr {
    Expr::Integer(IntegerLiteral {
        token: token(TokenKind::Int, &value.to_string()),
        value,
        span: null_span(),
    })
}

#[test]
fn test_let_statement_string() {
    let program = Program {
        statements: vec![Stmt::Let(LetStmt {
            token: token(TokenKind::Let, "let"),
            name: ident("myVar"),
            value: Expr::Identifier(ident("anotherVar")),
            span: null_span(),
        })],
        span: null_span(),
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_empty_program() {
    let program = Program {
        statements: vec![],
        span: null_span(),
    };

    assert_eq!(program.to_string(), "");
    assert_eq!(program.token_literal(), "");
}

#[test]
fn test_operator_strings() {
    let prefix = Expr::Prefix(PrefixExpr {
        token: token(TokenKind::Minus, "-"),
        operator: "-".to_string(),
        right: Box::new(int(5)),
        span: null_span(),
    });
    assert_eq!(prefix.to_string(), "(-5)");
    assert_eq!(prefix.token_literal(), "-");

    let infix = Expr::Infix(InfixExpr {
        token: token(TokenKind::Asterisk, "*"),
        left: Box::new(prefix),
        operator: "*".to_string(),
        right: Box::new(Expr::Identifier(ident("b"))),
        span: null_span(),
    });
    assert_eq!(infix.to_string(), "((-5) * b)");
    assert_eq!(infix.token_literal(), "*");
}

#[test]
fn test_function_and_call_strings() {
    let body = BlockStmt {
        token: token(TokenKind::LBrace, "{"),
        statements: vec![Stmt::Return(ReturnStmt {
            token: token(TokenKind::Return, "return"),
            return_value: Expr::Identifier(ident("x")),
            span: null_span(),
        })],
        span: null_span(),
    };

    let function = Expr::Function(FunctionLiteral {
        token: token(TokenKind::Function, "fn"),
        parameters: vec![ident("x"), ident("y")],
        body,
        span: null_span(),
    });
    assert_eq!(function.to_string(), "fn(x, y) return x;");

    let call = Stmt::Expression(ExpressionStmt {
        token: token(TokenKind::Ident, "add"),
        expression: Expr::Call(CallExpr {
            token: token(TokenKind::LParen, "("),
            function: Box::new(Expr::Identifier(ident("add"))),
            arguments: vec![int(1), int(2)],
            span: null_span(),
        }),
        span: null_span(),
    });
    assert_eq!(call.to_string(), "add(1, 2)");
    assert_eq!(call.token_literal(), "add");
}
