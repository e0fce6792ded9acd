//! # BUG Decoder
//!
//! Parses Braille text back into a [`PixelBuffer`].
//!
//! The grid size is only known once the whole text has been seen (width from
//! the first line, height from the line count), so decoding always reads the
//! source to the end before allocating anything.

use std::io::Read;

use log::debug;

use crate::braille::{Bounds, PixelBuffer, cell};
use crate::error::{BugError, Result};
use crate::render::threshold::Threshold;

/// Reads BUG text from a source.
#[derive(Debug)]
pub struct Decoder<R: Read> {
    source: R,
    threshold: Threshold,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            threshold: Threshold::DEFAULT,
        }
    }

    /// Threshold carried by the decoded buffer for later edits.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Read the entire source and decode it.
    pub fn decode(mut self) -> Result<PixelBuffer> {
        let mut bytes = Vec::new();
        self.source.read_to_end(&mut bytes)?;
        decode_bytes(&bytes, self.threshold)
    }

    /// Header-only decode is not possible: the dimensions depend on the
    /// whole text.
    pub fn decode_config(self) -> Result<(u32, u32)> {
        Err(BugError::Unsupported(
            "BUG dimensions require a full read, use decode instead".to_string(),
        ))
    }
}

/// Decode BUG text from `source` with default settings.
pub fn decode<R: Read>(source: R) -> Result<PixelBuffer> {
    Decoder::new(source).decode()
}

/// Decode an in-memory BUG text.
pub fn decode_bytes(bytes: &[u8], threshold: Threshold) -> Result<PixelBuffer> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| BugError::Format(format!("BUG text is not valid UTF-8: {}", e)))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(BugError::Format("empty BUG image".to_string()));
    }

    let rows: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let width = rows[0].chars().count();
    let height = rows.len();
    let (pixel_width, pixel_height) = pixel_extent(width, height)?;

    let mut buffer = PixelBuffer::new(Bounds::new(pixel_width, pixel_height));
    buffer.set_threshold(threshold);
    debug!("decoding {}x{} cells", width, height);

    if height > buffer.cell_height() as usize {
        return Err(BugError::Format(format!(
            "corrupted column: {} rows exceed {} allocated",
            height,
            buffer.cell_height()
        )));
    }

    for (row, line) in rows.iter().enumerate() {
        let glyphs = line.chars().count();
        if glyphs > buffer.cell_width() as usize {
            return Err(BugError::Format(format!(
                "corrupted row {}: {} cells exceed width {}",
                row,
                glyphs,
                buffer.cell_width()
            )));
        }

        for (col, glyph) in line.chars().enumerate() {
            buffer.put_cell(col as u32, row as u32, cell::cell_value(glyph));
        }
    }

    Ok(buffer)
}

/// Pixel size of a `width × height` cell grid.
fn pixel_extent(width: usize, height: usize) -> Result<(u32, u32)> {
    let scale = |cells: usize, per_cell: u32, axis: &str| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(per_cell))
            .ok_or_else(|| BugError::Format(format!("BUG image too large: {} {} cells", cells, axis)))
    };
    Ok((
        scale(width, cell::CELL_WIDTH, "columns")?,
        scale(height, cell::CELL_HEIGHT, "rows")?,
    ))
}
