//! # BUG Encoder
//!
//! Serializes a [`PixelBuffer`] as Braille text: one line per cell row, one
//! glyph per cell, each line terminated by `\n`.
//!
//! ## Line Layout
//!
//! Every Braille glyph is three bytes in UTF-8, so a row of `w` cells is
//! always exactly `3w + 1` bytes. The encoder fills one line buffer per row
//! and hands it to the sink with a single `write_all`.
//!
//! ```text
//! E2 A0|A1|A2|A3 80..BF   (x w)   0A
//! ```

use std::io::Write;

use image::{GenericImageView, Pixel};
use log::{debug, trace};

use super::Picture;
use crate::braille::{Bounds, PixelBuffer, cell};
use crate::error::Result;
use crate::render::threshold::{Shade, Threshold};

/// UTF-8 width of every glyph in the Braille block.
const GLYPH_BYTES: usize = 3;

/// Writes BUG text to a sink.
#[derive(Debug)]
pub struct Encoder<W: Write> {
    sink: W,
    threshold: Threshold,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            threshold: Threshold::DEFAULT,
        }
    }

    /// Threshold used by [`encode_picture`](Self::encode_picture).
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Write every cell row of `buffer`.
    ///
    /// The first rejected write aborts the encode and is returned as is.
    pub fn encode(&mut self, buffer: &PixelBuffer) -> Result<()> {
        let width = buffer.cell_width() as usize;
        debug!(
            "encoding {}x{} cells ({}x{} px)",
            width,
            buffer.cell_height(),
            buffer.bounds().width,
            buffer.bounds().height
        );

        let mut line = vec![0u8; width * GLYPH_BYTES + 1];
        line[width * GLYPH_BYTES] = b'\n';

        for (row, cells) in buffer.rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let start = col * GLYPH_BYTES;
                cell::glyph(value).encode_utf8(&mut line[start..start + GLYPH_BYTES]);
            }
            trace!("row {}: {} cells", row, cells.len());
            self.sink.write_all(&line)?;
        }

        Ok(())
    }

    /// Convert `picture` with this encoder's threshold, then encode it.
    pub fn encode_picture(&mut self, picture: Picture) -> Result<PixelBuffer> {
        let buffer = convert(picture, self.threshold);
        self.encode(&buffer)?;
        Ok(buffer)
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Encode `buffer` to `sink` with default settings.
pub fn encode<W: Write>(sink: W, buffer: &PixelBuffer) -> Result<()> {
    Encoder::new(sink).encode(buffer)
}

/// Binarize a picture into a [`PixelBuffer`].
///
/// A picture that is already a BUG buffer only has its threshold replaced;
/// its pixels are kept and nothing is reallocated. Any other image is copied
/// pixel by pixel through [`PixelBuffer::set`], each source pixel fully
/// replacing the destination.
pub fn convert(picture: Picture, threshold: Threshold) -> PixelBuffer {
    match picture {
        Picture::Braille(mut buffer) => {
            buffer.set_threshold(threshold);
            buffer
        }
        Picture::Raster(image) => convert_image(&image, threshold),
    }
}

/// Binarize any image view into a new [`PixelBuffer`] of the same size.
pub fn convert_image<I>(image: &I, threshold: Threshold) -> PixelBuffer
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let mut buffer = PixelBuffer::new(Bounds::new(width, height));
    buffer.set_threshold(threshold);

    for (x, y, pixel) in image.pixels() {
        buffer.set(x as i32, y as i32, Shade::from(pixel.to_rgba()));
    }

    debug!(
        "converted {}x{} image with threshold {}",
        width,
        height,
        threshold.value()
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::threshold::Dot;
    use image::{DynamicImage, GrayImage, Luma, RgbaImage, Rgba};
    use std::io;

    fn opaque_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(Bounds::new(width, height));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                buf.set(x, y, Dot::Opaque);
            }
        }
        buf
    }

    #[test]
    fn test_encode_two_full_cells() {
        let mut out = Vec::new();
        encode(&mut out, &opaque_buffer(2, 8)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\u{28FF}\n\u{28FF}\n");
    }

    #[test]
    fn test_encode_line_length() {
        let mut out = Vec::new();
        encode(&mut out, &PixelBuffer::new(Bounds::new(7, 9))).unwrap();
        // 4 cells wide, 3 cells tall.
        assert_eq!(out.len(), 3 * (4 * GLYPH_BYTES + 1));
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().all(|l| l == "\u{2800}".repeat(4)));
    }

    #[test]
    fn test_encode_empty_buffer_writes_nothing() {
        let mut out = Vec::new();
        encode(&mut out, &PixelBuffer::new(Bounds::new(0, 0))).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_encode_zero_width_buffer() {
        let mut out = Vec::new();
        encode(&mut out, &PixelBuffer::new(Bounds::new(0, 8))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n\n");
    }

    #[test]
    fn test_into_inner_returns_sink() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&opaque_buffer(2, 4)).unwrap();
        let out = encoder.into_inner().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\u{28FF}\n");
    }

    struct FailingSink {
        accepted: usize,
        budget: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.budget -= 1;
            self.accepted += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts() {
        let mut sink = FailingSink {
            accepted: 0,
            budget: 1,
        };
        let err = Encoder::new(&mut sink)
            .encode(&opaque_buffer(2, 12))
            .unwrap_err();
        assert!(matches!(err, crate::BugError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(sink.accepted, GLYPH_BYTES + 1);
    }

    #[test]
    fn test_convert_checkerboard() {
        // 2x4 checkerboard: luminance 0 at even (x + y).
        let img = GrayImage::from_fn(2, 4, |x, y| {
            if (x + y) % 2 == 0 { Luma([0]) } else { Luma([255]) }
        });
        let buf = convert(
            Picture::Raster(DynamicImage::ImageLuma8(img)),
            Threshold::DEFAULT,
        );

        let expected = cell::DOT_BITS[0][0] // (0,0)
            | cell::DOT_BITS[1][1] // (1,1)
            | cell::DOT_BITS[2][0] // (0,2)
            | cell::DOT_BITS[3][1]; // (1,3)
        assert_eq!(buf.cell_width(), 1);
        assert_eq!(buf.cell_height(), 1);
        assert_eq!(buf.cell(0, 0), Some(expected));
        assert_eq!(expected, 0x01 | 0x10 | 0x04 | 0x80);
    }

    #[test]
    fn test_convert_inverted_threshold() {
        let img = GrayImage::from_pixel(2, 4, Luma([255]));
        let buf = convert_image(&img, Threshold::DEFAULT.inverse());
        assert_eq!(buf.cell(0, 0), Some(0xFF));
        assert_eq!(buf.threshold(), Threshold::new(-100));
    }

    #[test]
    fn test_convert_rgba_premultiplies_alpha() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let buf = convert_image(&img, Threshold::DEFAULT);
        assert!(buf.is_opaque(0, 0));
        assert!(!buf.is_opaque(1, 0));
    }

    #[test]
    fn test_convert_reuses_braille_buffer() {
        let original = opaque_buffer(4, 4);
        let converted = convert(Picture::Braille(original.clone()), Threshold::new(-5));
        assert_eq!(converted.threshold(), Threshold::new(-5));
        assert_eq!(converted.raw(), original.raw());
        assert_eq!(converted.cell(0, 0), original.cell(0, 0));
    }

    #[test]
    fn test_encode_picture_uses_encoder_threshold() {
        let img = GrayImage::from_pixel(2, 4, Luma([150]));
        let mut out = Vec::new();
        let buf = Encoder::new(&mut out)
            .with_threshold(Threshold::new(200))
            .encode_picture(Picture::Raster(DynamicImage::ImageLuma8(img)))
            .unwrap();
        assert_eq!(buf.cell(0, 0), Some(0xFF));
        assert_eq!(String::from_utf8(out).unwrap(), "\u{28FF}\n");
    }
}
