//! Parser state and entry point.
//!
//! The parser walks the token stream with a cursor and dispatches through
//! lookup tables keyed by token kind:
//! - statement handlers for keyword-led statements
//! - NUD (null denotation) handlers for prefix positions
//! - LED (left denotation) handlers for infix operators
//! - binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::{CompUnit, NodeId},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_item,
};

pub struct Parser {
    /// Always ends with an EOF token.
    tokens: Vec<Token>,
    pos: usize,
    file: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    current_id: u32,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: 0,
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `offset` places ahead of the cursor.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The cursor never moves past the trailing EOF token.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();

        if token.kind != expected_kind {
            return Err(error.unwrap_or_else(|| {
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            }));
        }

        Ok(self.advance().clone())
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Error for the current token, with a hint about what was expected.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            },
            token.span.start.clone(),
        )
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers an infix handler and the binding power of its operator.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Hands out the next node identity.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    /// Number of node identities handed out so far.
    pub fn node_count(&self) -> u32 {
        self.current_id
    }

    /// Start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(index) => self.tokens[index].span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a token stream into a translation unit.
///
/// Returns the parser alongside the result so callers can inspect how
/// many node identities were handed out.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<CompUnit, Error>) {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    create_token_lookups(&mut parser);

    let id = parser.advance_id();
    let start = parser.get_position();
    let mut items = vec![];

    while parser.has_tokens() {
        match parse_item(&mut parser) {
            Ok(item) => items.push(item),
            Err(error) => return (parser, Err(error)),
        }
    }

    tracing::trace!(items = items.len(), nodes = parser.node_count(), "parsed");

    let span = Span {
        start,
        end: parser.get_position(),
    };
    (parser, Ok(CompUnit { id, items, span }))
}
