//! Unit tests for error handling.
//!
//! This module contains tests for error types, messages and tips.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::sync::Arc;

fn at(offset: u32) -> Position {
    Position(offset, Arc::from("test.monkey"))
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Ident,
            found: TokenKind::Assign,
        },
        at(4),
    );

    assert_eq!(error.to_string(), "expected next token to be IDENT, got = instead");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_no_prefix_parse_fn_message() {
    let error = Error::new(ErrorImpl::NoPrefixParseFn { kind: TokenKind::RParen }, at(0));

    assert_eq!(error.to_string(), "no prefix parse function for ) found");
    assert_eq!(error.get_error_name(), "NoPrefixParseFn");
}

#[test]
fn test_integer_parse_error_message() {
    let error = Error::new(
        ErrorImpl::IntegerParseError {
            literal: "92233720368547758070".to_string(),
        },
        at(0),
    );

    assert_eq!(
        error.to_string(),
        "could not parse \"92233720368547758070\" as integer"
    );
    assert_eq!(error.get_error_name(), "IntegerParseError");
}

#[test]
fn test_missing_return_value_message() {
    let error = Error::new(
        ErrorImpl::MissingReturnValue {
            found: TokenKind::Semicolon,
        },
        at(7),
    );

    assert_eq!(
        error.to_string(),
        "expected an expression after return, got ; instead"
    );
    assert_eq!(error.get_error_name(), "MissingReturnValue");
}

#[test]
fn test_nesting_too_deep_message() {
    let error = Error::new(ErrorImpl::NestingTooDeep { max: 64 }, at(0));

    assert_eq!(
        error.to_string(),
        "expression nesting is too deep (maximum 64 levels)"
    );
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Illegal,
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("Unrecognised character")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
