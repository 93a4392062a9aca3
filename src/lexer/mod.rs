//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts CACT source
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered regex pattern table
//! - Recognition of keywords, identifiers, literals, and operators
//! - Integer, float (`f` suffix) and double literal kinds
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
