use std::fmt::{self, Display};

use crate::Span;

use super::{
    expressions::{
        BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Root of a parsed source file.
///
/// Owns its top-level statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    /// Literal of the first statement's leading token, or `""` for an empty program.
    pub fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => &stmt.token.literal,
            Stmt::Return(stmt) => &stmt.token.literal,
            Stmt::Expression(stmt) => &stmt.token.literal,
            Stmt::Block(stmt) => &stmt.token.literal,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Let(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
            Stmt::Block(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression Types
///
/// Each variant owns its operands, so a tree never shares or cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
}

impl Expr {
    pub fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => &expr.token.literal,
            Expr::Integer(expr) => &expr.token.literal,
            Expr::Boolean(expr) => &expr.token.literal,
            Expr::Prefix(expr) => &expr.token.literal,
            Expr::Infix(expr) => &expr.token.literal,
            Expr::If(expr) => &expr.token.literal,
            Expr::Function(expr) => &expr.token.literal,
            Expr::Call(expr) => &expr.token.literal,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(expr) => &expr.span,
            Expr::Integer(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Infix(expr) => &expr.span,
            Expr::If(expr) => &expr.span,
            Expr::Function(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Boolean(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
            Expr::If(expr) => write!(f, "{}", expr),
            Expr::Function(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}", expr),
        }
    }
}
