//! # Introduction
//!
//! Fungeputer is an editor and stepper for a two-dimensional, stack-based
//! Befunge-style language. A program lives on a fixed 128x128 torus of integer
//! cells; the instruction pointer walks it, wrapping at the edges, while the
//! program pushes and pops values on an operand stack.
//!
//! ## Architecture
//!
//! ```text
//! keys → Keymap → Command → SessionController → Interpreter → Grid / Stack
//!                                  │                 │
//!                                  ▼                 ▼
//!                             SessionView → TUI   Storage (program image)
//! ```
//!
//! 1. [`memory`] — the toroidal [`memory::grid::Grid`] and the operand
//!    [`memory::stack::Stack`].
//! 2. [`interpreter`] — instruction decoding and the single-step
//!    [`interpreter::engine::Interpreter`].
//! 3. [`persistence`] — the program image format and the storage backends.
//! 4. [`session`] — the Editing / Running / HelpPopup state machine.
//! 5. [`config`] — command-line options and log setup.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Instruction set
//!
//! Digits, arithmetic `+ - * / %`, logical not `!`, the backtick comparison,
//! the direction changers `> < ^ v ?`, the conditionals `_ |`, string mode `"`,
//! stack shuffles `: \ $`, the bridge `#`, grid access `g p` and `@` to halt.
//! `. , & ~` are recognized but do nothing.

pub mod config;
pub mod interpreter;
pub mod memory;
pub mod persistence;
pub mod session;
pub mod ui;
