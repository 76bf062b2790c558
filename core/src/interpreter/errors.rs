//! Interpreter error types
//!
//! Every variant aborts the current run. Positions are token offsets into the
//! program, pointing at the start of the instruction that failed.

use super::types::Label;
use thiserror::Error;

/// Result type used throughout the interpreter
pub type InterpretResult<T> = Result<T, InterpretError>;

/// Failure reported by the pest backend while tokenizing
#[derive(Debug, Error)]
#[error("lexer error: {0}")]
pub struct LexError(pub String);

/// Fatal run errors
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("malformed program: stalled at token {position}")]
    MalformedProgram { position: usize },

    #[error("stack underflow: {instruction} at token {position} needs more values")]
    StackUnderflow {
        instruction: &'static str,
        position: usize,
    },

    #[error("call stack underflow: return at token {position} without a matching call")]
    CallStackUnderflow { position: usize },

    #[error("unknown label {label} referenced at token {position}")]
    UnknownLabel { label: Label, position: usize },

    #[error("division by zero: {instruction} at token {position}")]
    DivisionByZero {
        instruction: &'static str,
        position: usize,
    },

    #[error("number operand at token {position} does not fit in 64 bits")]
    NumberOverflow { position: usize },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
