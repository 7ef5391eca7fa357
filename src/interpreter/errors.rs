//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents the errors that can occur
//! while executing a single step. Neither is fatal to the process:
//!
//! - [`RuntimeError::DivisionByZero`] aborts the faulting instruction only; the
//!   engine keeps running on the next step.
//! - [`RuntimeError::StackOverflow`] halts the engine.
//!
//! Popping an empty stack and executing an unknown cell are defined behaviour,
//! not errors, and have no variant here.

use super::engine::Position;
use std::fmt;

/// Errors raised by [`Interpreter::step`](super::engine::Interpreter::step)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `/` or `%` with a zero divisor
    DivisionByZero {
        operation: char,
        dividend: i64,
        position: Position,
    },

    /// A push exceeded the operand stack limit
    StackOverflow { limit: usize, position: Position },
}

impl RuntimeError {
    pub fn position(&self) -> Position {
        match self {
            RuntimeError::DivisionByZero { position, .. } => *position,
            RuntimeError::StackOverflow { position, .. } => *position,
        }
    }

    /// Whether the error halted the engine
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuntimeError::StackOverflow { .. })
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero {
                operation,
                dividend,
                position,
            } => {
                let what = if *operation == '%' { "Modulo" } else { "Division" };
                write!(
                    f,
                    "{} by zero ({} {} 0) at ({}, {})",
                    what, dividend, operation, position.x, position.y
                )
            }
            RuntimeError::StackOverflow { limit, position } => {
                write!(
                    f,
                    "Stack overflow: limit of {} values reached at ({}, {})",
                    limit, position.x, position.y
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
