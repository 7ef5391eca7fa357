//! Discrete commands the session understands
//!
//! Commands arrive already translated from raw input (see
//! [`crate::ui::keymap`]); the session never sees key codes.

use crate::interpreter::engine::Direction;

/// One user command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Point the cursor in a direction and move one cell
    Navigate(Direction),
    /// Execute exactly one instruction
    Step,
    /// Start autoplay
    Run,
    /// Open the help popup
    Help,
    /// Close the open popup
    Dismiss,
    /// Blank every cell of the program
    ClearProgram,
    /// Empty the operand stack
    ClearStack,
    /// Write the program image to storage
    Save,
    /// Replace the program with the stored image
    Load,
    /// Return the pointer to the origin and clear stack, modes and halt
    Reset,
    /// Write a printable ASCII character into the cell under the pointer
    Write(char),
}

impl Command {
    /// Build a [`Command::Write`] if `c` is printable ASCII (0x20..=0x7E)
    pub fn write(c: char) -> Option<Command> {
        is_writable(c).then_some(Command::Write(c))
    }
}

/// Printable ASCII, the only characters that can be written into a cell
pub fn is_writable(c: char) -> bool {
    (' '..='~').contains(&c)
}
