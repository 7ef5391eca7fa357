//! Toroidal program memory
//!
//! [`Grid`] is a fixed-size, row-major array of [`Cell`]s. Every access is
//! reduced with floor-modulo on both axes, so `(x + width, y)` and `(x - width, y)`
//! address the same cell as `(x, y)`. Negative coordinates wrap to the far edge
//! rather than truncating toward zero.
//!
//! # Binary Layout
//!
//! [`Grid::serialize`] and [`Grid::read_cells`] move the raw cell body only:
//! `y` outer, `x` inner, each cell as [`CELL_BYTES`] little-endian bytes. The
//! self-describing header lives in [`crate::persistence`].

use crate::interpreter::constants::{BLANK_CELL, CELL_BYTES, Cell, GRID_HEIGHT, GRID_WIDTH};
use std::io::{self, Read};

/// Two-dimensional wraparound program memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a blank grid of the given shape
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Grid {
            width,
            height,
            cells: vec![BLANK_CELL; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reduce an arbitrary coordinate pair onto the torus
    pub fn wrap(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(self.width as i64) as usize,
            y.rem_euclid(self.height as i64) as usize,
        )
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let (x, y) = self.wrap(x, y);
        y * self.width + x
    }

    /// Read the cell at `(x, y)`
    pub fn get(&self, x: i64, y: i64) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Overwrite the cell at `(x, y)`
    pub fn set(&mut self, x: i64, y: i64, value: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Reset every cell to a space
    pub fn clear(&mut self) {
        self.cells.fill(BLANK_CELL);
    }

    /// Build a grid from plain source text, one line per row starting at the origin
    ///
    /// Characters beyond the grid edge are dropped. Returns the number of
    /// characters that did not fit, so callers can warn about it.
    pub fn from_text(text: &str, width: usize, height: usize) -> (Self, usize) {
        let mut grid = Grid::new(width, height);
        let mut dropped = 0;
        for (y, line) in text.lines().enumerate() {
            for (x, c) in line.chars().enumerate() {
                if x < width && y < height {
                    grid.set(x as i64, y as i64, c as Cell);
                } else {
                    dropped += 1;
                }
            }
        }
        (grid, dropped)
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Size of the raw cell body in bytes
    pub fn body_len(&self) -> usize {
        self.cells.len() * CELL_BYTES
    }

    /// Serialize the raw cell body into a fresh buffer
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body_len());
        for cell in &self.cells {
            out.extend_from_slice(&cell.to_le_bytes());
        }
        out
    }

    /// Read a raw cell body of the given shape
    ///
    /// The cells are staged into a new grid, so a short stream yields
    /// `UnexpectedEof` and no existing grid is touched.
    pub fn read_cells<R: Read>(reader: &mut R, width: usize, height: usize) -> io::Result<Self> {
        let mut grid = Grid::new(width, height);
        let mut buf = [0u8; CELL_BYTES];
        for (i, cell) in grid.cells.iter_mut().enumerate() {
            reader.read_exact(&mut buf).map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("program image ended after {} of {} cells", i, width * height),
                    )
                } else {
                    e
                }
            })?;
            *cell = Cell::from_le_bytes(buf);
        }
        Ok(grid)
    }

    /// Copy out a `cols` x `rows` window whose top-left corner is `(x0, y0)`
    pub fn window(&self, x0: i64, y0: i64, cols: usize, rows: usize) -> Vec<Vec<Cell>> {
        (0..rows as i64)
            .map(|dy| {
                (0..cols as i64)
                    .map(|dx| self.get(x0 + dx, y0 + dy))
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_blank() {
        let grid = Grid::new(4, 3);
        assert!(grid.cells().iter().all(|&c| c == b' ' as Cell));
        assert_eq!(grid.cells().len(), 12);
    }

    #[test]
    fn test_wraparound_both_axes() {
        let mut grid = Grid::new(5, 7);
        grid.set(2, 3, 99);

        assert_eq!(grid.get(2 + 5, 3), 99);
        assert_eq!(grid.get(2 - 5, 3), 99);
        assert_eq!(grid.get(2, 3 + 7), 99);
        assert_eq!(grid.get(2, 3 - 14), 99);
    }

    #[test]
    fn test_negative_coordinates_floor_wrap() {
        let mut grid = Grid::new(5, 5);
        grid.set(-1, -1, 7);

        assert_eq!(grid.get(4, 4), 7);
        assert_eq!(grid.wrap(-6, -1), (4, 4));
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut grid = Grid::default();
        grid.set(i64::MIN, i64::MAX, 5);
        let (x, y) = grid.wrap(i64::MIN, i64::MAX);
        assert_eq!(grid.get(x as i64, y as i64), 5);
    }

    #[test]
    fn test_clear_resets_to_space() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, b'@' as Cell);
        grid.clear();
        assert_eq!(grid.get(1, 1), b' ' as Cell);
    }

    #[test]
    fn test_serialize_layout_is_row_major_le() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, 0x0102);
        let bytes = grid.serialize();

        assert_eq!(bytes.len(), 4 * CELL_BYTES);
        // second cell of the first row
        assert_eq!(&bytes[CELL_BYTES..CELL_BYTES + 2], &[0x02, 0x01]);
        assert_eq!(&bytes[0..CELL_BYTES], &(b' ' as Cell).to_le_bytes());
    }

    #[test]
    fn test_read_cells_round_trip() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 1, -42);
        grid.set(2, 0, i64::MAX);

        let bytes = grid.serialize();
        let loaded = Grid::read_cells(&mut bytes.as_slice(), 3, 2).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_read_cells_truncated() {
        let grid = Grid::new(3, 2);
        let bytes = grid.serialize();
        let short = &bytes[..bytes.len() - 1];

        let err = Grid::read_cells(&mut &short[..], 3, 2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_from_text() {
        let (grid, dropped) = Grid::from_text("12+\n@", 3, 3);
        assert_eq!(dropped, 0);
        assert_eq!(grid.get(2, 0), b'+' as Cell);
        assert_eq!(grid.get(0, 1), b'@' as Cell);

        let (_, dropped) = Grid::from_text("abcd", 3, 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_window_wraps() {
        let mut grid = Grid::new(4, 4);
        grid.set(3, 3, b'x' as Cell);
        let window = grid.window(-1, -1, 2, 2);
        assert_eq!(window[0][0], b'x' as Cell);
    }
}
