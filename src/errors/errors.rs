use std::fmt::Display;

use thiserror::Error;

use crate::{ast::ast::NodeId, Position, Span};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    node: Option<NodeId>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            node: None,
        }
    }

    /// Creates an error pointing at a checked tree node.
    pub fn at_node(error_impl: ErrorImpl, node: NodeId, span: &Span) -> Self {
        Error {
            internal_error: error_impl,
            position: span.start.clone(),
            node: Some(node),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// The tree node the error was raised on, if it came from the checker.
    pub fn get_node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateSymbol { .. } => "DuplicateSymbol",
            ErrorImpl::UndeclaredSymbol { .. } => "UndeclaredSymbol",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::InvalidArrayDimension { .. } => "InvalidArrayDimension",
            ErrorImpl::ArrayDimensionMismatch { .. } => "ArrayDimensionMismatch",
            ErrorImpl::NonConstantInitializer => "NonConstantInitializer",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::ScalarIndexing { .. } => "ScalarIndexing",
            ErrorImpl::InvalidArrayIndexType { .. } => "InvalidArrayIndexType",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::InvalidOperandType { .. } => "InvalidOperandType",
            ErrorImpl::ControlFlowOutsideLoop { .. } => "ControlFlowOutsideLoop",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::TooFewArguments { .. } => "TooFewArguments",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateSymbol { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UndeclaredSymbol { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", name))
            }
            ErrorImpl::UndeclaredFunction { name } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared before this call", name))
            }
            ErrorImpl::InvalidArrayDimension { dimension } => ErrorTip::Suggestion(format!(
                "Array dimension `{}` must be a positive integer",
                dimension
            )),
            ErrorImpl::ArrayDimensionMismatch { depth, reason } => ErrorTip::Suggestion(format!(
                "Initializer does not match the array shape at depth {}: {}",
                depth, reason
            )),
            ErrorImpl::NonConstantInitializer => ErrorTip::Suggestion(String::from(
                "Initializer elements must be constant expressions",
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Function returns `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ScalarIndexing {
                variable,
                dimensions,
                indices,
            } => ErrorTip::Suggestion(format!(
                "`{}` has {} dimension(s) but is indexed {} time(s)",
                variable, dimensions, indices
            )),
            ErrorImpl::InvalidArrayIndexType { received } => ErrorTip::Suggestion(format!(
                "Array indices must be `int32`, received `{}`",
                received
            )),
            ErrorImpl::InvalidAssignmentTarget { variable } => ErrorTip::Suggestion(format!(
                "`{}` is a constant and cannot be assigned to",
                variable
            )),
            ErrorImpl::InvalidOperandType { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::ControlFlowOutsideLoop { statement } => {
                ErrorTip::Suggestion(format!("`{}` used outside of a while loop", statement))
            }
            ErrorImpl::TooManyArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::TooFewArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch {
                function,
                index,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} of `{}` expects `{}`, received `{}`",
                index + 1,
                function,
                expected,
                received
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("symbol {name:?} already declared")]
    DuplicateSymbol { name: String },
    #[error("symbol {name:?} not declared")]
    UndeclaredSymbol { name: String },
    #[error("function {name:?} not declared")]
    UndeclaredFunction { name: String },
    #[error("invalid array dimension {dimension}")]
    InvalidArrayDimension { dimension: String },
    #[error("array initializer mismatch at depth {depth}: {reason}")]
    ArrayDimensionMismatch { depth: usize, reason: String },
    #[error("initializer element is not a constant expression")]
    NonConstantInitializer,
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("return type mismatch: expected {expected}, received {received}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("{variable:?} indexed {indices} times but has {dimensions} dimensions")]
    ScalarIndexing {
        variable: String,
        dimensions: usize,
        indices: usize,
    },
    #[error("array index must be int32, received {received}")]
    InvalidArrayIndexType { received: String },
    #[error("{variable:?} is not a valid assignment target")]
    InvalidAssignmentTarget { variable: String },
    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidOperandType { operator: String, operand: String },
    #[error("{statement} outside of a loop")]
    ControlFlowOutsideLoop { statement: String },
    #[error("too many arguments to {function:?}: expected {expected}, received {received}")]
    TooManyArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("too few arguments to {function:?}: expected {expected}, received {received}")]
    TooFewArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of {function:?}: expected {expected}, received {received}")]
    ArgumentTypeMismatch {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
}
