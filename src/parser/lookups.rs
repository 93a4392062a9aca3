use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Literals, names and prefix operators
    parser.nud(TokenKind::IntegerConstant, parse_number_expr);
    parser.nud(TokenKind::FloatConstant, parse_number_expr);
    parser.nud(TokenKind::DoubleConstant, parse_number_expr);
    parser.nud(TokenKind::True, parse_bool_expr);
    parser.nud(TokenKind::False, parse_bool_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Continue, parse_continue_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
