//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the lexer's token
//! stream into an Abstract Syntax Tree. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, blocks, expression statements)
//! - Expression parsing (prefix/infix operators, calls, `if`, function literals)
//! - Error accumulation and recovery at statement boundaries
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
