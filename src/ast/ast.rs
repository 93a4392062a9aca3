use std::fmt::Display;

use crate::Span;

use super::statements::{Decl, FuncDef};

/// Stable identity of a syntax tree node.
///
/// Allocated by the parser in increasing order; the checker uses it to
/// link `break`/`continue` to their loop and to point diagnostics at the
/// offending node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A whole translation unit: the root of the tree.
#[derive(Debug, Clone)]
pub struct CompUnit {
    pub id: NodeId,
    pub items: Vec<Item>,
    pub span: Span,
}

/// Top-level item of a translation unit.
#[derive(Debug, Clone)]
pub enum Item {
    Decl(Decl),
    FuncDef(FuncDef),
}

impl Item {
    pub fn get_span(&self) -> &Span {
        match self {
            Item::Decl(decl) => &decl.span,
            Item::FuncDef(func) => &func.span,
        }
    }
}
