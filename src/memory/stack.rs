//! Operand stack
//!
//! A LIFO of [`Cell`] values. Popping an empty stack is defined behaviour and
//! yields `0`; it is never an error. Pushing past the configured depth limit
//! returns [`StackOverflow`], which the interpreter turns into a
//! [`RuntimeError`](crate::interpreter::errors::RuntimeError).

use crate::interpreter::constants::{Cell, DEFAULT_STACK_LIMIT};
use std::fmt;

/// Push rejected because the stack is at its depth limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOverflow {
    pub limit: usize,
}

impl fmt::Display for StackOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operand stack is full ({} values)", self.limit)
    }
}

impl std::error::Error for StackOverflow {}

/// The operand stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Cell>,
    limit: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack::with_limit(DEFAULT_STACK_LIMIT)
    }

    /// Create a stack that holds at most `limit` values
    pub fn with_limit(limit: usize) -> Self {
        Stack {
            values: Vec::new(),
            limit,
        }
    }

    /// Push a value
    pub fn push(&mut self, value: Cell) -> Result<(), StackOverflow> {
        if self.values.len() >= self.limit {
            return Err(StackOverflow { limit: self.limit });
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop the top value, or `0` when empty
    pub fn pop(&mut self) -> Cell {
        self.values.pop().unwrap_or(0)
    }

    /// Peek at the top value without removing it
    pub fn peek(&self) -> Option<Cell> {
        self.values.last().copied()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// All values, bottom first (for UI display)
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
