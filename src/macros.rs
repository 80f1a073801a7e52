//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span between two byte offsets of one file

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's literal text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            literal: $literal,
            span: $span,
        }
    };
}

/// Creates a Span covering `$start..$end` in `$file`.
///
/// # Example
///
/// ```ignore
/// let span = MK_SPAN!(lexer.position, lexer.read_position, lexer.file);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr, $file:expr) => {
        $crate::Span {
            start: $crate::Position($start as u32, ::std::sync::Arc::clone(&$file)),
            end: $crate::Position($end as u32, ::std::sync::Arc::clone(&$file)),
        }
    };
}
