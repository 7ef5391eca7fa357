// Render snapshot handed to the display layer

use super::{Mode, Popup};
use crate::interpreter::constants::Cell;
use crate::interpreter::engine::{Direction, Position};

/// Everything a display needs to paint one frame
///
/// The window is a `cols` x `rows` block of cells centered on the pointer.
/// `origin` is the unwrapped grid coordinate of its top-left cell, so
/// `origin.x + col` can be reduced modulo the grid width to find seams.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub mode: Mode,
    pub popup: Popup,
    pub origin: Position,
    pub cells: Vec<Vec<Cell>>,
    /// Pointer location inside `cells` as `(col, row)`
    pub cursor: (usize, usize),
    pub pointer: Position,
    pub direction: Direction,
    pub current_value: Cell,
    /// Stack contents, bottom first
    pub stack: Vec<Cell>,
    pub string_mode: bool,
    pub halted: bool,
    pub steps: u64,
    pub grid_size: (usize, usize),
    pub status: String,
    pub error: Option<String>,
}

impl SessionView {
    /// Whether window column `col` sits on grid column 0
    pub fn is_column_seam(&self, col: usize) -> bool {
        (self.origin.x + col as i64).rem_euclid(self.grid_size.0 as i64) == 0
    }

    /// Whether window row `row` sits on grid row 0
    pub fn is_row_seam(&self, row: usize) -> bool {
        (self.origin.y + row as i64).rem_euclid(self.grid_size.1 as i64) == 0
    }
}
