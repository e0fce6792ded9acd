//! # BUG Codec
//!
//! Converts between images and Braille Unicode Graphics text.
//!
//! ## Module Structure
//!
//! - [`writer`]: [`Encoder`] and image → [`PixelBuffer`] conversion
//! - [`reader`]: [`Decoder`]
//! - [`format`]: opt-in magic-prefix registry with `image` crate fallback
//!
//! ## Usage Example
//!
//! ```
//! use bug::codec::{self, Picture};
//! use bug::render::threshold::Threshold;
//! use image::{DynamicImage, GrayImage, Luma};
//!
//! // A 4x4 image: left half black, right half white
//! let img = GrayImage::from_fn(4, 4, |x, _| if x < 2 { Luma([0]) } else { Luma([255]) });
//! let buffer = codec::convert(Picture::Raster(DynamicImage::ImageLuma8(img)), Threshold::DEFAULT);
//!
//! let mut text = Vec::new();
//! codec::encode(&mut text, &buffer)?;
//! assert_eq!(String::from_utf8(text.clone()).unwrap(), "\u{28FF}\u{2800}\n");
//!
//! let decoded = codec::decode(text.as_slice())?;
//! assert_eq!(decoded, buffer);
//! # Ok::<(), bug::BugError>(())
//! ```

pub mod format;
pub mod reader;
pub mod writer;

use image::DynamicImage;

use crate::braille::PixelBuffer;

pub use reader::{Decoder, decode};
pub use writer::{Encoder, convert, convert_image, encode};

/// An image handed to the codec: either already a BUG buffer, or a generic
/// raster from the `image` crate.
#[derive(Debug, Clone)]
pub enum Picture {
    Braille(PixelBuffer),
    Raster(DynamicImage),
}

impl From<PixelBuffer> for Picture {
    fn from(buffer: PixelBuffer) -> Self {
        Picture::Braille(buffer)
    }
}

impl From<DynamicImage> for Picture {
    fn from(image: DynamicImage) -> Self {
        Picture::Raster(image)
    }
}

impl Picture {
    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Picture::Braille(buffer) => {
                let bounds = buffer.bounds();
                (bounds.width, bounds.height)
            }
            Picture::Raster(image) => (image.width(), image.height()),
        }
    }
}
