//! # Pixel Buffer
//!
//! A monochrome image kept in two synchronized forms:
//!
//! - **raw**: one byte per source pixel (0 = transparent, 255 = opaque)
//! - **cells**: one packed byte per 2×4 block, ready to become a glyph
//!
//! Every mutation goes through [`PixelBuffer::set`] or
//! [`PixelBuffer::clear`], which update both forms together.
//!
//! ## Example
//!
//! ```
//! use bug::braille::{Bounds, PixelBuffer};
//! use bug::render::threshold::Dot;
//!
//! let mut buf = PixelBuffer::new(Bounds::new(3, 5));
//! assert_eq!((buf.cell_width(), buf.cell_height()), (2, 2));
//!
//! buf.set(0, 0, Dot::Opaque);
//! assert_eq!(buf.glyph_at(0, 0), '\u{2801}');
//! assert_eq!(buf.glyph_at(9, 9), '\u{2800}');
//! ```

use image::{GenericImageView, GrayImage, Luma};

use super::cell::{self, CELL_HEIGHT, CELL_WIDTH};
use crate::render::threshold::{Dot, Shade, Threshold};

/// Pixel-space rectangle: an origin plus an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Rectangle anchored at the origin.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            width,
            height,
        }
    }

    pub const fn with_origin(min_x: i32, min_y: i32, width: u32, height: u32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Offset of `(x, y)` from the origin, or `None` outside the rectangle.
    #[inline]
    pub fn local(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let dx = x as i64 - self.min_x as i64;
        let dy = y as i64 - self.min_y as i64;
        if dx < 0 || dy < 0 || dx >= self.width as i64 || dy >= self.height as i64 {
            return None;
        }
        Some((dx as u32, dy as u32))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.local(x, y).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Monochrome image with its Braille cell packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bounds: Bounds,
    cell_width: u32,
    cell_height: u32,
    raw: GrayImage,
    cells: Vec<u8>,
    threshold: Threshold,
}

impl PixelBuffer {
    /// Allocate an all-transparent buffer covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        let cell_width = cell::cells_for(bounds.width, CELL_WIDTH);
        let cell_height = cell::cells_for(bounds.height, CELL_HEIGHT);

        Self {
            bounds,
            cell_width,
            cell_height,
            raw: GrayImage::new(bounds.width, bounds.height),
            cells: vec![0u8; cell_width as usize * cell_height as usize],
            threshold: Threshold::DEFAULT,
        }
    }

    /// Pixel-space rectangle.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width in cells.
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Height in cells.
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Change the policy applied by later calls to [`set`](Self::set).
    /// Existing pixels are not re-binarized.
    pub fn set_threshold(&mut self, threshold: Threshold) {
        self.threshold = threshold;
    }

    /// Binarize `color` and store it at `(x, y)`.
    ///
    /// Coordinates outside the bounds are silently discarded so callers can
    /// walk a larger or offset source without clipping first.
    pub fn set<C: Into<Shade>>(&mut self, x: i32, y: i32, color: C) {
        let Some((lx, ly)) = self.bounds.local(x, y) else {
            return;
        };

        let dot = self.threshold.convert(color);
        self.put_dot(lx, ly, dot);
    }

    /// Store an already binarized dot at a local coordinate.
    fn put_dot(&mut self, lx: u32, ly: u32, dot: Dot) {
        self.raw.put_pixel(lx, ly, Luma([dot.value()]));

        let idx = self.cell_index(lx / CELL_WIDTH, ly / CELL_HEIGHT);
        let bit = cell::dot_bit(lx as i64, ly as i64);
        if dot.is_opaque() {
            self.cells[idx] |= bit;
        } else {
            self.cells[idx] &= !bit;
        }
    }

    /// Zero every raw pixel and every cell.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = 0;
        }
        for px in self.raw.iter_mut() {
            *px = 0;
        }
    }

    /// Whether the pixel at `(x, y)` is opaque. Out of bounds reads as
    /// transparent.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        match self.bounds.local(x, y) {
            Some((lx, ly)) => self.raw.get_pixel(lx, ly).0[0] != 0,
            None => false,
        }
    }

    /// Packed value of a cell, or `None` outside the cell grid.
    pub fn cell(&self, cell_x: u32, cell_y: u32) -> Option<u8> {
        if cell_x >= self.cell_width || cell_y >= self.cell_height {
            return None;
        }
        Some(self.cells[self.cell_index(cell_x, cell_y)])
    }

    /// Glyph for a cell; the empty glyph outside the cell grid.
    pub fn glyph_at(&self, cell_x: i64, cell_y: i64) -> char {
        if cell_x < 0 || cell_y < 0 {
            return cell::BLANK;
        }
        match (u32::try_from(cell_x), u32::try_from(cell_y)) {
            (Ok(cx), Ok(cy)) => self.cell(cx, cy).map_or(cell::BLANK, cell::glyph),
            _ => cell::BLANK,
        }
    }

    /// Packed cells, one slice per cell row, top to bottom.
    ///
    /// A zero-width buffer still yields one empty slice per cell row.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let width = self.cell_width as usize;
        (0..self.cell_height as usize).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    /// Raw sub-pixel grid (0 or 255 per pixel).
    pub fn raw(&self) -> &GrayImage {
        &self.raw
    }

    /// Overwrite a whole cell and its 8 sub-pixels from a packed value.
    ///
    /// Sub-pixels falling outside the pixel bounds (the padding of a partial
    /// trailing cell) are skipped in the raw grid but the packed value is
    /// stored as given.
    pub(crate) fn put_cell(&mut self, cell_x: u32, cell_y: u32, value: u8) {
        let idx = self.cell_index(cell_x, cell_y);
        self.cells[idx] = value;

        let (x0, y0) = (cell_x * CELL_WIDTH, cell_y * CELL_HEIGHT);
        for dy in 0..CELL_HEIGHT {
            for dx in 0..CELL_WIDTH {
                let (lx, ly) = (x0 + dx, y0 + dy);
                if lx >= self.bounds.width || ly >= self.bounds.height {
                    continue;
                }
                let bit = cell::DOT_BITS[dy as usize][dx as usize];
                let dot = Dot::from_bit(value & bit != 0);
                self.raw.put_pixel(lx, ly, Luma([dot.value()]));
            }
        }
    }

    #[inline]
    fn cell_index(&self, cell_x: u32, cell_y: u32) -> usize {
        cell_y as usize * self.cell_width as usize + cell_x as usize
    }
}

/// Read-only pixel access in local coordinates (origin at `(0, 0)`).
impl GenericImageView for PixelBuffer {
    type Pixel = Luma<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.bounds.width, self.bounds.height)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Luma<u8> {
        *self.raw.get_pixel(x, y)
    }
}
