//! Operator table.
//!
//! Every unary and binary operator of the language is one variant of
//! [`Operator`]. Each variant validates its operand types and computes its
//! result type as a pure function of those types. [`Operator::Nop`] passes a
//! single operand through unchanged and tags expressions that apply no
//! operator, such as a parenthesised sub-expression.

use std::fmt::Display;

use crate::{
    ast::types::{BasicType, Type},
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Nop,

    // Unary
    Plus,
    Neg,
    Not,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Relational
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Equality
    Equal,
    NotEqual,

    // Logical
    And,
    Or,
}

impl Operator {
    pub fn from_prefix_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Operator::Plus),
            TokenKind::Dash => Some(Operator::Neg),
            TokenKind::Not => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn from_infix_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Dash => Some(Operator::Sub),
            TokenKind::Star => Some(Operator::Mul),
            TokenKind::Slash => Some(Operator::Div),
            TokenKind::Percent => Some(Operator::Mod),
            TokenKind::Less => Some(Operator::Less),
            TokenKind::LessEquals => Some(Operator::LessEqual),
            TokenKind::Greater => Some(Operator::Greater),
            TokenKind::GreaterEquals => Some(Operator::GreaterEqual),
            TokenKind::Equals => Some(Operator::Equal),
            TokenKind::NotEquals => Some(Operator::NotEqual),
            TokenKind::And => Some(Operator::And),
            TokenKind::Or => Some(Operator::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Nop => "",
            Operator::Plus | Operator::Add => "+",
            Operator::Neg | Operator::Sub => "-",
            Operator::Not => "!",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    fn invalid(&self, operand: String) -> ErrorImpl {
        ErrorImpl::InvalidOperandType {
            operator: self.to_string(),
            operand,
        }
    }

    /// Validates the operand of a unary operator (or of `Nop`).
    pub fn check_operand(&self, ty: &Type) -> Result<(), ErrorImpl> {
        let valid = match self {
            Operator::Nop => true,
            Operator::Plus | Operator::Neg => {
                ty.is_valid_operand() && ty.basic_type.is_numeric()
            }
            Operator::Not => ty.is_valid_operand() && ty.basic_type == BasicType::Bool,
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(self.invalid(ty.to_string()))
        }
    }

    /// Validates both operands of a binary operator.
    ///
    /// Operands never convert: both sides must already have the same type.
    pub fn check_operands(&self, lhs: &Type, rhs: &Type) -> Result<(), ErrorImpl> {
        let both_valid = lhs.is_valid_operand() && rhs.is_valid_operand() && lhs == rhs;
        let basic = lhs.basic_type;

        let valid = both_valid
            && match self {
                Operator::Nop => true,
                Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
                | Operator::Less
                | Operator::LessEqual
                | Operator::Greater
                | Operator::GreaterEqual => basic.is_numeric(),
                Operator::Mod => basic == BasicType::Int32,
                Operator::Equal | Operator::NotEqual => true,
                Operator::And | Operator::Or => basic == BasicType::Bool,
                Operator::Plus | Operator::Neg | Operator::Not => false,
            };

        if valid {
            Ok(())
        } else {
            Err(self.invalid(format!("{} and {}", lhs, rhs)))
        }
    }

    /// Result type given the (already validated) left or only operand.
    pub fn result_type(&self, operand: &Type) -> Type {
        match self {
            Operator::Nop
            | Operator::Plus
            | Operator::Neg
            | Operator::Add
            | Operator::Sub
            | Operator::Mul
            | Operator::Div
            | Operator::Mod => operand.clone(),
            Operator::Not
            | Operator::Less
            | Operator::LessEqual
            | Operator::Greater
            | Operator::GreaterEqual
            | Operator::Equal
            | Operator::NotEqual
            | Operator::And
            | Operator::Or => Type::scalar(BasicType::Bool),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Nop => write!(f, "nop"),
            _ => write!(f, "{}", self.symbol()),
        }
    }
}
