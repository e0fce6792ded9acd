//! # Braille Raster
//!
//! Monochrome pixel storage packed into Braille cells.
//!
//! - [`cell`]: dot bit layout and glyph mapping
//! - [`buffer`]: [`PixelBuffer`], the synchronized raw + packed image

pub mod buffer;
pub mod cell;

pub use buffer::{Bounds, PixelBuffer};
