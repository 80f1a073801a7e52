//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Pull-based scanning, one token per `next_token` call
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Token position tracking for error reporting
//! - Whitespace skipping and `ILLEGAL` tokens for unrecognised characters

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
