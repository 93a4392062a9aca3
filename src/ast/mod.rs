/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree the checker walks
///
/// Every node is a closed enum variant or plain struct with a `NodeId`;
/// semantic attributes are `Option` fields the checker fills in place.
///
/// Submodules:
/// - ast: Node identities and the translation unit root
/// - expressions: Expression nodes and their semantic facts
/// - statements: Declarations, functions, blocks and statements
/// - types: The type system (basic kinds and array shapes)
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
