//! # Threshold Binarization
//!
//! Reduces an arbitrary color to a single dot decision: set (opaque) or clear
//! (transparent). A color is converted to luminance and compared against a
//! signed cutoff.
//!
//! ```text
//! t >= 0:  opaque  <=>  Y < t
//! t <  0:  opaque  <=>  !(Y < |t|)
//! ```
//!
//! The sign carries the inversion so a single integer round-trips through
//! flags and builders: `Threshold::new(100).inverse()` is `Threshold(-100)`.
//!
//! ## Example
//!
//! ```
//! use bug::render::threshold::{Dot, Threshold};
//! use image::Luma;
//!
//! let t = Threshold::DEFAULT;
//! assert_eq!(t.convert(Luma([0u8])), Dot::Opaque);
//! assert_eq!(t.convert(Luma([255u8])), Dot::Transparent);
//! assert_eq!(t.inverse().convert(Luma([0u8])), Dot::Transparent);
//! ```

use image::{Luma, LumaA, Rgb, Rgba};

/// Binary state of one sub-pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dot {
    /// Dot set, stored as 255 in the raw grid.
    Opaque,
    /// Dot clear, stored as 0 in the raw grid.
    Transparent,
}

impl Dot {
    /// Raw grid value for this dot.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Dot::Opaque => 255,
            Dot::Transparent => 0,
        }
    }

    /// Dot for a packed cell bit.
    #[inline]
    pub fn from_bit(set: bool) -> Self {
        if set { Dot::Opaque } else { Dot::Transparent }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self == Dot::Opaque
    }

    #[inline]
    fn flip(self) -> Self {
        match self {
            Dot::Opaque => Dot::Transparent,
            Dot::Transparent => Dot::Opaque,
        }
    }
}

/// Input to [`Threshold::convert`].
///
/// `Opaque` and `Transparent` are sentinels that bypass the luminance test;
/// the decoder uses them so a decoded dot is never re-binarized. Everything
/// else is reduced to luminance first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Opaque,
    Transparent,
    /// Luminance in `0..=255`.
    Gray(u8),
}

impl From<Dot> for Shade {
    fn from(dot: Dot) -> Self {
        match dot {
            Dot::Opaque => Shade::Opaque,
            Dot::Transparent => Shade::Transparent,
        }
    }
}

impl From<Luma<u8>> for Shade {
    fn from(p: Luma<u8>) -> Self {
        Shade::Gray(p.0[0])
    }
}

impl From<LumaA<u8>> for Shade {
    fn from(p: LumaA<u8>) -> Self {
        let [y, a] = p.0;
        Shade::Gray(luminance(y, y, y, a))
    }
}

impl From<Rgb<u8>> for Shade {
    fn from(p: Rgb<u8>) -> Self {
        let [r, g, b] = p.0;
        Shade::Gray(luminance(r, g, b, 255))
    }
}

impl From<Rgba<u8>> for Shade {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Shade::Gray(luminance(r, g, b, a))
    }
}

/// Rec. 601 luminance of a straight-alpha color.
///
/// Channels are widened to 16 bits and premultiplied by alpha before
/// weighting, so a fully transparent pixel has luminance 0.
pub fn luminance(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let widen = |c: u8| c as u64 * 0x101;
    let a16 = widen(a);
    let premul = |c: u8| widen(c) * a16 / 0xFFFF;

    let y = (19595 * premul(r) + 38470 * premul(g) + 7471 * premul(b) + (1 << 15)) >> 24;
    y as u8
}

/// Signed luminance cutoff. Negative values invert the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threshold(i32);

impl Threshold {
    /// Cutoff used when none is configured.
    pub const DEFAULT: Threshold = Threshold(100);

    /// `i32::MIN` is clamped to `-i32::MAX` so every threshold has an
    /// inverse.
    pub const fn new(value: i32) -> Self {
        if value == i32::MIN {
            Threshold(-i32::MAX)
        } else {
            Threshold(value)
        }
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// True when the decision is flipped.
    pub const fn is_inverted(self) -> bool {
        self.0 < 0
    }

    /// Same cutoff, opposite polarity.
    pub const fn inverse(self) -> Self {
        Threshold(-self.0)
    }

    /// Binarize a color.
    pub fn convert<C: Into<Shade>>(self, color: C) -> Dot {
        let dot = match color.into() {
            Shade::Opaque => Dot::Opaque,
            Shade::Transparent => Dot::Transparent,
            Shade::Gray(y) => Dot::from_bit((y as i64) < (self.0 as i64).abs()),
        };

        if self.is_inverted() { dot.flip() } else { dot }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i32> for Threshold {
    fn from(value: i32) -> Self {
        Threshold::new(value)
    }
}
