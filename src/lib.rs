#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Builds a span covering `start` through the end of `end`.
    pub fn between(start: &Span, end: &Span) -> Self {
        Span {
            start: start.start.clone(),
            end: end.end.clone(),
        }
    }
}

/// Returns `(line number, line text, column)` for a byte offset into `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    // Errors reported at end of input point just past the last character.
    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    let last = source.rsplit('\n').next().unwrap_or("");
    Some((line_number.max(2) - 1, last.to_string(), last.len()))
}


pub fn display_error(error: &Error, file_name: &str, source: &str) {
    /*
        Error: TypeMismatch (Expected type `int32`, received `float`)
        -> main.cact
           |
        20 | int32 a = 1.0f;
           | ----------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file_name);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
