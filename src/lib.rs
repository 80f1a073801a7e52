#![allow(clippy::module_inception)]

use std::{fmt::Write, sync::Arc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// Byte offset into a source file, paired with the file's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<str>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::from("<null>"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line text (including its newline) and the
/// column of `position` within that line. A position one past the end of the source
/// resolves to the last line, so errors reported at `EOF` still have somewhere to point.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        last = Some((line_number, line.to_string(), pos - start));
        start = end;
        line_number += 1;
    }

    if pos == source.len() {
        return last.or(Some((1, String::new(), 0)));
    }

    None
}

/// Renders an error as a caret-annotated snippet of `source`.
///
/// ```text
/// Error: UnexpectedToken (expected next token to be IDENT, got = instead)
/// -> shell
///   |
/// 1 | let = 10;
///   | ----^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", position.1);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (&string[start..], start)
}
