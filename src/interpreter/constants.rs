// Build-time constants for the interpreter

/// A single program cell: an instruction code point or a datum written by `p`
pub type Cell = i64;

/// Width of the program grid in cells
pub const GRID_WIDTH: usize = 128;

/// Height of the program grid in cells
pub const GRID_HEIGHT: usize = 128;

/// Bytes per cell in the persisted program image
pub const CELL_BYTES: usize = std::mem::size_of::<Cell>();

/// Value every cell holds after creation or an explicit clear
pub const BLANK_CELL: Cell = b' ' as Cell;

/// Default cap on the operand stack depth
pub const DEFAULT_STACK_LIMIT: usize = 64 * 1024;
