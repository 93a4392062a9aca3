//! Parser module for building the syntax tree.
//!
//! Transforms the token stream into a [`crate::ast::ast::CompUnit`]. Keyword
//! statements dispatch through a lookup table; expressions use a Pratt
//! parser with NUD (null denotation) and LED (left denotation) handlers and
//! binding powers for precedence. Every node receives a fresh
//! [`crate::ast::ast::NodeId`].

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
