//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while lexing, parsing and
//! checking a CACT translation unit. It includes:
//!
//! - Error structures with source position and offending node
//! - Specific error variants for every front-end phase
//! - Error names and human-readable suggestions for the driver

pub mod errors;
