//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerConstant, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a punctuation or operator token.
///
/// The generated handler pushes a token of `$kind` spanning `$value.len()`
/// bytes at the current position and advances past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span_of($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}
