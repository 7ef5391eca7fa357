//! Memory model for the interpreter
//!
//! This module provides the two pieces of state the program operates on:
//! - [`grid`]: the toroidal program memory, which is both code and data
//! - [`stack`]: the operand stack with its zero-on-empty pop
//!
//! # Addressing
//!
//! Grid coordinates are signed and unbounded. They are reduced with
//! floor-modulo before indexing:
//! ```text
//! (x, y)  →  (x mod width, y mod height)      where mod is never negative
//! ```

pub mod grid;
pub mod stack;
