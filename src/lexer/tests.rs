//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Operators and punctuation, single and double character
//! - Keywords and identifiers
//! - Integer literals
//! - Illegal characters
//! - End of input behaviour and spans

use super::{
    lexer::{tokenize, Lexer},
    tokens::{lookup_ident, TokenKind},
};

fn kinds_and_literals(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source.to_string(), None)
        .into_iter()
        .map(|token| (token.kind, token.literal))
        .collect()
}

#[test]
fn test_next_token_punctuation() {
    let mut lexer = Lexer::new("=+(){},;".to_string());

    let expected = [
        (TokenKind::Assign, "="),
        (TokenKind::Plus, "+"),
        (TokenKind::LParen, "("),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Comma, ","),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    for (kind, literal) in expected {
        let token = lexer.next_token();
        assert_eq!(token.kind, kind);
        assert_eq!(token.literal, literal);
    }

    // EOF is sticky
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_program() {
    let source = "let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
";

    let expected = vec![
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "five"),
        (TokenKind::Assign, "="),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "ten"),
        (TokenKind::Assign, "="),
        (TokenKind::Int, "10"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "add"),
        (TokenKind::Assign, "="),
        (TokenKind::Function, "fn"),
        (TokenKind::LParen, "("),
        (TokenKind::Ident, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Ident, "y"),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Ident, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Ident, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Let, "let"),
        (TokenKind::Ident, "result"),
        (TokenKind::Assign, "="),
        (TokenKind::Ident, "add"),
        (TokenKind::LParen, "("),
        (TokenKind::Ident, "five"),
        (TokenKind::Comma, ","),
        (TokenKind::Ident, "ten"),
        (TokenKind::RParen, ")"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Bang, "!"),
        (TokenKind::Minus, "-"),
        (TokenKind::Slash, "/"),
        (TokenKind::Asterisk, "*"),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Int, "5"),
        (TokenKind::Lt, "<"),
        (TokenKind::Int, "10"),
        (TokenKind::Gt, ">"),
        (TokenKind::Int, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::If, "if"),
        (TokenKind::LParen, "("),
        (TokenKind::Int, "5"),
        (TokenKind::Lt, "<"),
        (TokenKind::Int, "10"),
        (TokenKind::RParen, ")"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::True, "true"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Else, "else"),
        (TokenKind::LBrace, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::False, "false"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::RBrace, "}"),
        (TokenKind::Int, "10"),
        (TokenKind::Eq, "=="),
        (TokenKind::Int, "10"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Int, "10"),
        (TokenKind::NotEq, "!="),
        (TokenKind::Int, "9"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    let expected: Vec<(TokenKind, String)> = expected
        .into_iter()
        .map(|(kind, literal)| (kind, literal.to_string()))
        .collect();

    assert_eq!(kinds_and_literals(source), expected);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = kinds_and_literals("foo bar_baz _under x1 fnord letter");

    assert_eq!(tokens[0], (TokenKind::Ident, "foo".to_string()));
    assert_eq!(tokens[1], (TokenKind::Ident, "bar_baz".to_string()));
    assert_eq!(tokens[2], (TokenKind::Ident, "_under".to_string()));
    assert_eq!(tokens[3], (TokenKind::Ident, "x1".to_string()));
    // Keywords only match whole words
    assert_eq!(tokens[4], (TokenKind::Ident, "fnord".to_string()));
    assert_eq!(tokens[5], (TokenKind::Ident, "letter".to_string()));
    assert_eq!(tokens[6].0, TokenKind::EOF);
}

#[test]
fn test_tokenize_integers_keep_text() {
    let tokens = kinds_and_literals("0 007 99999999999999999999999");

    assert_eq!(tokens[0], (TokenKind::Int, "0".to_string()));
    assert_eq!(tokens[1], (TokenKind::Int, "007".to_string()));
    assert_eq!(tokens[2], (TokenKind::Int, "99999999999999999999999".to_string()));
}

#[test]
fn test_tokenize_digits_then_letters() {
    let tokens = kinds_and_literals("5abc");

    assert_eq!(tokens[0], (TokenKind::Int, "5".to_string()));
    assert_eq!(tokens[1], (TokenKind::Ident, "abc".to_string()));
}

#[test]
fn test_tokenize_illegal_characters() {
    let tokens = kinds_and_literals("let x = @ # é;");

    assert_eq!(tokens[3], (TokenKind::Illegal, "@".to_string()));
    assert_eq!(tokens[4], (TokenKind::Illegal, "#".to_string()));
    assert_eq!(tokens[5], (TokenKind::Illegal, "é".to_string()));
    assert_eq!(tokens[6], (TokenKind::Semicolon, ";".to_string()));
    assert_eq!(tokens[7].0, TokenKind::EOF);
}

#[test]
fn test_tokenize_double_char_at_end_of_input() {
    let tokens = kinds_and_literals("= ! == !=");

    assert_eq!(tokens[0].0, TokenKind::Assign);
    assert_eq!(tokens[1].0, TokenKind::Bang);
    assert_eq!(tokens[2].0, TokenKind::Eq);
    assert_eq!(tokens[3].0, TokenKind::NotEq);
    assert_eq!(tokens[4].0, TokenKind::EOF);

    let tokens = kinds_and_literals("!");
    assert_eq!(tokens[0], (TokenKind::Bang, "!".to_string()));
    assert_eq!(tokens[1].0, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_and_whitespace_only() {
    assert_eq!(kinds_and_literals(""), vec![(TokenKind::EOF, String::new())]);
    assert_eq!(
        kinds_and_literals("  \t\r\n  "),
        vec![(TokenKind::EOF, String::new())]
    );
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let abc == 12".to_string(), Some("test.monkey".to_string()));

    let offsets: Vec<(u32, u32)> = tokens
        .iter()
        .map(|token| (token.span.start.0, token.span.end.0))
        .collect();

    assert_eq!(offsets, vec![(0, 3), (4, 7), (8, 10), (11, 13), (13, 13)]);
    assert_eq!(&*tokens[0].span.start.1, "test.monkey");
}

#[test]
fn test_file_labels() {
    assert_eq!(&**Lexer::new(String::new()).file(), "shell");

    let mut lexer = Lexer::with_file("x".to_string(), Some("main.monkey".to_string()));
    assert_eq!(&**lexer.file(), "main.monkey");
    assert_eq!(&*lexer.next_token().span.end.1, "main.monkey");
}

#[test]
fn test_token_spans_multibyte() {
    let tokens = tokenize("é+".to_string(), None);

    assert_eq!((tokens[0].span.start.0, tokens[0].span.end.0), (0, 2));
    assert_eq!((tokens[1].span.start.0, tokens[1].span.end.0), (2, 3));
    assert_eq!(&*tokens[0].span.start.1, "shell");
}

#[test]
fn test_lookup_ident() {
    assert_eq!(lookup_ident("fn"), TokenKind::Function);
    assert_eq!(lookup_ident("let"), TokenKind::Let);
    assert_eq!(lookup_ident("true"), TokenKind::True);
    assert_eq!(lookup_ident("false"), TokenKind::False);
    assert_eq!(lookup_ident("if"), TokenKind::If);
    assert_eq!(lookup_ident("else"), TokenKind::Else);
    assert_eq!(lookup_ident("return"), TokenKind::Return);
    assert_eq!(lookup_ident("Let"), TokenKind::Ident);
}

#[test]
fn test_token_kind_display() {
    assert_eq!(TokenKind::Ident.to_string(), "IDENT");
    assert_eq!(TokenKind::Assign.to_string(), "=");
    assert_eq!(TokenKind::NotEq.to_string(), "!=");
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
    assert_eq!(TokenKind::Function.to_string(), "FUNCTION");
}
