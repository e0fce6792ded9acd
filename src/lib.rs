//! # Bug - Braille Unicode Graphics
//!
//! Bug is a Rust library for turning monochrome images into Braille text and
//! back. Every Braille glyph (U+2800..U+28FF) holds a 2×4 block of pixels, one
//! bit per dot, so an image becomes plain text at eight pixels per character.
//! It provides:
//!
//! - **Pixel buffer**: raw pixels kept in sync with their packed Braille cells
//! - **Thresholding**: luminance cutoff binarization with sign-encoded inversion
//! - **Codec**: BUG text encoder and decoder
//! - **Format registry**: opt-in magic sniffing alongside PNG/JPEG/GIF
//!
//! ## Quick Start
//!
//! ```no_run
//! use bug::{
//!     codec::{self, format::Registry},
//!     render::threshold::Threshold,
//! };
//!
//! // Decode any supported image (or existing BUG text)
//! let bytes = std::fs::read("gopher.png")?;
//! let (picture, _format) = Registry::with_bug().decode(&bytes)?;
//!
//! // Binarize and write Braille text
//! let buffer = codec::convert(picture, Threshold::DEFAULT);
//! codec::encode(std::io::stdout().lock(), &buffer)?;
//!
//! # Ok::<(), bug::BugError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`braille`] | Cell layout and pixel buffer |
//! | [`render`] | Threshold binarization |
//! | [`codec`] | Encoder, decoder, format registry |
//! | [`error`] | Error types |

pub mod braille;
pub mod codec;
pub mod error;
pub mod render;

// Re-exports for convenience
pub use braille::{Bounds, PixelBuffer};
pub use codec::Picture;
pub use error::BugError;
pub use render::threshold::Threshold;
