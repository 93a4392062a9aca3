use crate::{
    type_checker::registry::{FunctionId, ScopeId, SymbolId},
    Span,
};

use super::{
    ast::NodeId,
    expressions::{Expr, LValue},
    types::BasicType,
};

/// `[const] btype def, def, ...;`
#[derive(Debug, Clone)]
pub struct Decl {
    pub id: NodeId,
    pub is_constant: bool,
    pub basic_type: BasicType,
    pub defs: Vec<VarDef>,
    pub span: Span,
}

/// Literal text written between array brackets, e.g. `3` or `-1`.
#[derive(Debug, Clone)]
pub struct DimLiteral {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VarDef {
    pub id: NodeId,
    pub name: String,
    pub dims: Vec<DimLiteral>,
    pub init: Option<InitVal>,
    pub span: Span,
    /// Filled in by the checker.
    pub symbol: Option<SymbolId>,
}

/// A scalar initializer expression or a braced list of nested initializers.
#[derive(Debug, Clone)]
pub struct InitVal {
    pub id: NodeId,
    pub kind: InitValKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum InitValKind {
    Expr(Expr),
    List(Vec<InitVal>),
}

impl InitVal {
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, InitValKind::Expr(_))
    }
}

#[derive(Debug, Clone)]
pub struct FuncParam {
    pub id: NodeId,
    pub name: String,
    pub basic_type: BasicType,
    /// Written as `name[]...`: the outer dimension is left unsized.
    pub unsized_first_dim: bool,
    pub dims: Vec<DimLiteral>,
    pub span: Span,
    /// Filled in by the checker.
    pub symbol: Option<SymbolId>,
}

#[derive(Debug, Clone)]
pub struct FuncDef {
    pub id: NodeId,
    pub name: String,
    pub return_type: BasicType,
    pub params: Vec<FuncParam>,
    pub body: Block,
    pub span: Span,
    /// Filled in by the checker.
    pub function: Option<FunctionId>,
    /// Filled in by the checker: scope holding the parameters.
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: NodeId,
    pub items: Vec<BlockItem>,
    pub span: Span,
    /// Filled in by the checker.
    pub scope: Option<ScopeId>,
    /// Filled in by the checker.
    pub has_return: bool,
}

#[derive(Debug, Clone)]
pub enum BlockItem {
    Decl(Decl),
    Stmt(Stmt),
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
    /// Filled in by the checker.
    pub has_return: bool,
}

impl Stmt {
    pub fn new(id: NodeId, kind: StmtKind, span: Span) -> Self {
        Stmt {
            id,
            kind,
            span,
            has_return: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Assign {
        target: LValue,
        value: Expr,
    },
    /// `expr;` or the empty statement `;`.
    Expr(Option<Expr>),
    Block(Block),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Break {
        /// Filled in by the checker: the `NodeId` of the enclosing while.
        target: Option<NodeId>,
    },
    Continue {
        /// Filled in by the checker: the `NodeId` of the enclosing while.
        target: Option<NodeId>,
    },
    Return {
        value: Option<Expr>,
        /// Filled in by the checker.
        function: Option<FunctionId>,
    },
}
