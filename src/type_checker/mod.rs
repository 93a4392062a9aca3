//! Semantic analysis.
//!
//! One depth-first walk over the parsed tree that:
//!
//! - builds the scope tree and registers every variable, constant,
//!   parameter and function signature
//! - resolves every name to its declaration
//! - validates aggregate initializers against array shapes
//! - checks operand, assignment, return and argument types by exact
//!   identity
//! - links `break`/`continue` to their loop and computes which statements
//!   return on every path
//!
//! Results are written onto the tree nodes as handles into the
//! [`registry::SymbolRegistry`] owned by the returned checker. The walk
//! stops at the first error.

pub mod expr;
pub mod initializer;
pub mod operators;
pub mod registry;
pub mod stmt;
pub mod type_checker;

#[cfg(test)]
mod tests;
