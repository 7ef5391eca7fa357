//! Program image persistence
//!
//! This module turns a [`Grid`] into bytes and back:
//! - [`encode`] / [`decode`]: the self-describing program image format
//! - [`storage`]: where images are written to and read from
//!
//! # Image Format
//!
//! ```text
//! offset  size  field
//! 0       4     magic "BFNG"
//! 4       1     format version (1)
//! 5       1     cell width in bytes (8)
//! 6       2     reserved, zero
//! 8       2     grid width  (u16, little-endian)
//! 10      2     grid height (u16, little-endian)
//! 12      ...   cells, row-major, little-endian
//! ```
//!
//! Headerless images written by the handheld firmware are still accepted when
//! their length is exactly `width * height * 8` bytes for the expected shape.

pub mod storage;

use crate::interpreter::constants::CELL_BYTES;
use crate::memory::grid::Grid;
use std::fmt;
use std::io;

/// Leading bytes of every headered program image
pub const MAGIC: [u8; 4] = *b"BFNG";

/// Current image format version
pub const FORMAT_VERSION: u8 = 1;

/// Size of the image header in bytes
pub const HEADER_LEN: usize = 12;

/// Errors raised while decoding a program image
#[derive(Debug)]
pub enum CodecError {
    /// Stream ended before the declared number of cells was read
    Truncated { expected: usize, got: usize },

    /// Extra bytes after the last cell
    TrailingBytes { extra: usize },

    /// Header carries a version this build cannot read
    UnsupportedVersion { version: u8 },

    /// Cell width in the header does not match this build
    CellWidthMismatch { expected: usize, got: usize },

    /// Grid shape in the header does not match the running grid
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Neither a headered image nor a raw image of the expected size
    UnrecognizedFormat { len: usize },

    /// Grid too large to describe in the header
    GridTooLarge { width: usize, height: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Truncated { expected, got } => {
                write!(
                    f,
                    "Program image truncated: expected {} bytes of cells, got {}",
                    expected, got
                )
            }
            CodecError::TrailingBytes { extra } => {
                write!(f, "Program image has {} unexpected trailing bytes", extra)
            }
            CodecError::UnsupportedVersion { version } => {
                write!(
                    f,
                    "Unsupported program image version {} (expected {})",
                    version, FORMAT_VERSION
                )
            }
            CodecError::CellWidthMismatch { expected, got } => {
                write!(
                    f,
                    "Cell width mismatch: image uses {}-byte cells, this build uses {}",
                    got, expected
                )
            }
            CodecError::ShapeMismatch { expected, got } => {
                write!(
                    f,
                    "Grid shape mismatch: image is {}x{}, expected {}x{}",
                    got.0, got.1, expected.0, expected.1
                )
            }
            CodecError::UnrecognizedFormat { len } => {
                write!(f, "Unrecognized program image ({} bytes)", len)
            }
            CodecError::GridTooLarge { width, height } => {
                write!(f, "Grid {}x{} is too large to save", width, height)
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        let kind = match err {
            CodecError::Truncated { .. } => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

/// Encode a grid as a headered program image
pub fn encode(grid: &Grid) -> Result<Vec<u8>, CodecError> {
    let (width, height) = match (u16::try_from(grid.width()), u16::try_from(grid.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(CodecError::GridTooLarge {
                width: grid.width(),
                height: grid.height(),
            });
        }
    };

    let mut out = Vec::with_capacity(HEADER_LEN + grid.body_len());
    out.extend_from_slice(&MAGIC);
    out.push(FORMAT_VERSION);
    out.push(CELL_BYTES as u8);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&grid.serialize());
    Ok(out)
}

/// Decode a program image for a grid of `width` x `height`
///
/// Nothing is returned unless the whole image is valid, so a failed load can
/// never leave a half-written grid behind.
pub fn decode(bytes: &[u8], width: usize, height: usize) -> Result<Grid, CodecError> {
    let body_len = width * height * CELL_BYTES;

    // raw image from the handheld firmware; a headered image is never this long
    if bytes.len() == body_len {
        return read_body(bytes, width, height);
    }
    if !bytes.starts_with(&MAGIC) {
        return Err(CodecError::UnrecognizedFormat { len: bytes.len() });
    }

    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            expected: HEADER_LEN,
            got: bytes.len(),
        });
    }

    let version = bytes[4];
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion { version });
    }

    let cell_width = bytes[5] as usize;
    if cell_width != CELL_BYTES {
        return Err(CodecError::CellWidthMismatch {
            expected: CELL_BYTES,
            got: cell_width,
        });
    }

    let img_width = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    let img_height = u16::from_le_bytes([bytes[10], bytes[11]]) as usize;
    if (img_width, img_height) != (width, height) {
        return Err(CodecError::ShapeMismatch {
            expected: (width, height),
            got: (img_width, img_height),
        });
    }

    let body = &bytes[HEADER_LEN..];
    if body.len() < body_len {
        return Err(CodecError::Truncated {
            expected: body_len,
            got: body.len(),
        });
    }
    if body.len() > body_len {
        return Err(CodecError::TrailingBytes {
            extra: body.len() - body_len,
        });
    }
    read_body(body, width, height)
}

fn read_body(body: &[u8], width: usize, height: usize) -> Result<Grid, CodecError> {
    Grid::read_cells(&mut &body[..], width, height).map_err(|_| CodecError::Truncated {
        expected: width * height * CELL_BYTES,
        got: body.len(),
    })
}
