//! # Braille Cell Layout
//!
//! One Braille glyph covers a 2×4 block of source pixels. The Unicode block
//! starting at U+2800 assigns one bit per dot, so a cell is a plain `u8` and
//! the glyph is `U+2800 + cell`.
//!
//! ```text
//!   dx=0  dx=1
//! +-----+-----+
//! | 0x01| 0x08|  dy=0   (dots 1, 4)
//! +-----+-----+
//! | 0x02| 0x10|  dy=1   (dots 2, 5)
//! +-----+-----+
//! | 0x04| 0x20|  dy=2   (dots 3, 6)
//! +-----+-----+
//! | 0x40| 0x80|  dy=3   (dots 7, 8)
//! +-----+-----+
//! ```
//!
//! Dots 7 and 8 were added to the block after the six-dot range, which is why
//! the bottom row jumps to the high bits.

/// Source pixels per cell, horizontally.
pub const CELL_WIDTH: u32 = 2;

/// Source pixels per cell, vertically.
pub const CELL_HEIGHT: u32 = 4;

/// First code point of the Braille Patterns block (empty cell).
pub const BLANK: char = '\u{2800}';

/// Last code point of the Braille Patterns block (all eight dots).
pub const FULL: char = '\u{28FF}';

/// Bit for each sub-pixel, indexed `[dy][dx]`.
pub const DOT_BITS: [[u8; 2]; 4] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

/// Bit for the sub-pixel at `(dx, dy)` inside its cell.
///
/// Coordinates are reduced modulo the cell size, so negative pixel offsets
/// wrap to the correct dot instead of panicking.
#[inline]
pub fn dot_bit(dx: i64, dy: i64) -> u8 {
    let col = dx.rem_euclid(CELL_WIDTH as i64) as usize;
    let row = dy.rem_euclid(CELL_HEIGHT as i64) as usize;
    DOT_BITS[row][col]
}

/// Glyph for a packed cell value.
#[inline]
pub fn glyph(cell: u8) -> char {
    // U+2800..=U+28FF are all valid scalar values.
    char::from_u32(BLANK as u32 + cell as u32).unwrap_or(BLANK)
}

/// Packed cell value for a glyph.
///
/// Code points outside the Braille block wrap into `0..=255` rather than
/// failing; the text format trusts its input here.
#[inline]
pub fn cell_value(glyph: char) -> u8 {
    (glyph as u32).wrapping_sub(BLANK as u32) as u8
}

/// Number of cells needed to cover `pixels` along an axis of `cell_size`.
#[inline]
pub fn cells_for(pixels: u32, cell_size: u32) -> u32 {
    pixels.div_ceil(cell_size)
}
