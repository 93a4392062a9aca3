use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("const", TokenKind::Const);
        map.insert("int", TokenKind::Int32);
        map.insert("int32", TokenKind::Int32);
        map.insert("bool", TokenKind::Bool);
        map.insert("float", TokenKind::Float);
        map.insert("double", TokenKind::Double);
        map.insert("void", TokenKind::Void);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    IntegerConstant,
    FloatConstant,
    DoubleConstant,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Const,
    Int32,
    Bool,
    Float,
    Double,
    Void,
    If,
    Else,
    While,
    Break,
    Continue,
    Return,
    True,
    False,
}

impl TokenKind {
    /// Whether the token names one of the declarable element types.
    pub fn is_data_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Int32 | TokenKind::Bool | TokenKind::Float | TokenKind::Double
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerConstant | TokenKind::FloatConstant | TokenKind::DoubleConstant
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
