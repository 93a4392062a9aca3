use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(source).expect("lexer patterns are valid regular expressions"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^(([0-9]*\\.[0-9]+|[0-9]+\\.)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)[fF]", float_handler),
        pattern("^(([0-9]*\\.[0-9]+|[0-9]+\\.)([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)", double_handler),
        pattern("^0[xX][0-9a-fA-F]+", integer_handler),
        pattern("^[0-9]+", integer_handler),
        pattern("^\\s+", skip_handler),
        pattern("^//[^\\n]*", skip_handler),
        pattern("^/\\*[\\s\\S]*?\\*/", skip_handler),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span of the next `len` bytes starting at the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn push_number(lexer: &mut Lexer, regex: &Regex, kind: TokenKind) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());
    let len = matched.len();

    lexer.push(MK_TOKEN!(kind, matched, span));
    lexer.advance_n(len);
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    push_number(lexer, regex, TokenKind::IntegerConstant);
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) {
    push_number(lexer, regex, TokenKind::FloatConstant);
}

fn double_handler(lexer: &mut Lexer, regex: &Regex) {
    push_number(lexer, regex, TokenKind::DoubleConstant);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = lexer.matched(regex).len();
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    let len = value.len();

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    lexer.push(MK_TOKEN!(kind, value, span));

    lexer.advance_n(len);
}

#[tracing::instrument(skip(source))]
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: lex.at().to_string() },
                    lex.position(),
                ))
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    tracing::trace!(count = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
