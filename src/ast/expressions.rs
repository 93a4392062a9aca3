use crate::{
    type_checker::{
        operators::Operator,
        registry::{FunctionId, SymbolId},
    },
    Span,
};

use super::{ast::NodeId, types::Type};

/// Lexical kind of a numeric literal; it alone decides the literal's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
    Double,
}

/// Semantic facts the checker attaches to every expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInfo {
    pub ty: Type,
    pub is_constant: bool,
    pub is_assignable: bool,
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
    /// Filled in by the checker.
    pub info: Option<ExprInfo>,
}

impl Expr {
    pub fn new(id: NodeId, kind: ExprKind, span: Span) -> Self {
        Expr {
            id,
            kind,
            span,
            info: None,
        }
    }

    /// The resolved type, once checked.
    pub fn ty(&self) -> Option<&Type> {
        self.info.as_ref().map(|info| &info.ty)
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Number {
        text: String,
        kind: NumberKind,
    },
    Bool(bool),
    LValue(LValue),
    /// Parenthesised sub-expression; checked through the no-op operator.
    Paren(Box<Expr>),
    Unary {
        operator: Operator,
        operand: Box<Expr>,
    },
    Binary {
        operator: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: String,
        arguments: Vec<Expr>,
        /// Filled in by the checker.
        function: Option<FunctionId>,
    },
}

/// A (possibly indexed) variable reference: `a`, `a[i][j]`.
#[derive(Debug, Clone)]
pub struct LValue {
    pub id: NodeId,
    pub name: String,
    pub indices: Vec<Expr>,
    pub span: Span,
    /// Filled in by the checker.
    pub symbol: Option<SymbolId>,
    /// Filled in by the checker: the referenced symbol is not a constant.
    pub assignable: bool,
}

impl LValue {
    pub fn new(id: NodeId, name: String, indices: Vec<Expr>, span: Span) -> Self {
        LValue {
            id,
            name,
            indices,
            span,
            symbol: None,
            assignable: false,
        }
    }
}
