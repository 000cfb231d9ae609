use std::fmt::Display;

use thiserror::Error;

use crate::{type_checker::diagnostics::Diagnostic, vm::value::TypeTag, Position};

/// A fatal syntax error raised by the lexer or the parser.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
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
            ErrorImpl::InvalidAssignmentTarget { target } => ErrorTip::Suggestion(format!(
                "Only a variable can be assigned to, found `{}`",
                target
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.position.line, self.internal_error)
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
    #[error("invalid assignment target: {target:?}")]
    InvalidAssignmentTarget { target: String },
}

/// A fatal fault raised while reading or executing an instruction stream.
///
/// `line` is the 1-based line of the instruction in the stream text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("line {line}: unknown instruction `{opcode}`")]
    UnknownOpcode { line: usize, opcode: String },
    #[error("line {line}: {opcode} - malformed instruction `{text}`")]
    MalformedInstruction {
        line: usize,
        opcode: String,
        text: String,
    },
    #[error("line {line}: {opcode} - cannot parse {value:?} as type {tag}")]
    InvalidValue {
        line: usize,
        opcode: &'static str,
        tag: TypeTag,
        value: String,
    },
    #[error("line {line}: read - no input line available")]
    EndOfInput { line: usize },
    #[error("line {line}: {opcode} - stack underflow")]
    StackUnderflow { line: usize, opcode: &'static str },
    #[error("line {line}: {opcode} - unsupported operand types {operands}")]
    OperandMismatch {
        line: usize,
        opcode: &'static str,
        operands: String,
    },
    #[error("line {line}: load - variable `{name}` has no value")]
    UndefinedVariable { line: usize, name: String },
    #[error("line {line}: {opcode} - integer division by zero")]
    DivisionByZero { line: usize, opcode: &'static str },
    #[error("line {line}: {opcode} - {message}")]
    Io {
        line: usize,
        opcode: &'static str,
        message: String,
    },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::UnknownOpcode { line, .. }
            | RuntimeError::MalformedInstruction { line, .. }
            | RuntimeError::InvalidValue { line, .. }
            | RuntimeError::EndOfInput { line }
            | RuntimeError::StackUnderflow { line, .. }
            | RuntimeError::OperandMismatch { line, .. }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::DivisionByZero { line, .. }
            | RuntimeError::Io { line, .. } => *line,
        }
    }
}

/// Why source text could not be turned into instructions.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("{0}")]
    Syntax(#[from] Error),
    #[error("{} semantic error(s)", .0.len())]
    Diagnostics(Vec<Diagnostic>),
}
