//! Befunge-style interpreter
//!
//! This module provides the execution core:
//! - [`engine`]: the [`Interpreter`](engine::Interpreter) and its `step()` transition
//! - [`instruction`]: decoding of cell values into a closed instruction set
//! - [`errors`]: runtime error types
//! - [`constants`]: cell type, grid shape and other build-time constants
//!
//! # Execution Model
//!
//! Each call to `step()` executes the cell under the pointer and then moves the
//! pointer one cell along its direction, wrapping at the grid edges. In string
//! mode cells are pushed verbatim until the closing `"`. `@` halts the engine;
//! the caller checks [`Interpreter::is_halted`](engine::Interpreter::is_halted)
//! after each step.
//!
//! # Unimplemented Instructions
//!
//! `.` `,` `&` `~` are decoded but execute as no-ops. There is no output or
//! input channel.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instruction;
