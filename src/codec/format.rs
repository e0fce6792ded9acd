//! # Format Registry
//!
//! Routes raw bytes to the right decoder by magic prefix. Formats are added
//! explicitly by the host application; nothing is registered at load time.
//!
//! Bytes that match no registered prefix fall through to the `image` crate,
//! which sniffs PNG, JPEG, GIF and the rest of its enabled formats.
//!
//! ## Example
//!
//! ```
//! use bug::codec::format::Registry;
//! use bug::codec::Picture;
//!
//! let registry = Registry::with_bug();
//! let (picture, name) = registry.decode("\u{2800}\u{28FF}\n".as_bytes())?;
//! assert_eq!(name, "bug");
//! assert!(matches!(picture, Picture::Braille(_)));
//! # Ok::<(), bug::BugError>(())
//! ```

use log::debug;

use super::Picture;
use super::reader;
use crate::error::{BugError, Result};
use crate::render::threshold::Threshold;

/// Name under which the Braille text format registers.
pub const BUG_FORMAT: &str = "bug";

/// UTF-8 of the two sentinel glyphs a BUG text may start with: the empty
/// cell U+2800 and the full left-and-middle cell U+283F.
pub const BUG_MAGIC: [&[u8]; 2] = [b"\xE2\xA0\x80", b"\xE2\xA0\xBF"];

/// Decoder entry point stored in the registry.
pub type DecodeFn = fn(&[u8]) -> Result<Picture>;

/// One registered format.
#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub name: &'static str,
    pub magic: &'static [u8],
    pub decode: DecodeFn,
}

impl Format {
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.magic)
    }
}

/// Ordered list of formats; the first matching prefix wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    formats: Vec<Format>,
}

impl Registry {
    /// Empty registry: only the `image` crate fallback is active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the BUG format already added.
    pub fn with_bug() -> Self {
        let mut registry = Self::new();
        register(&mut registry);
        registry
    }

    pub fn register(&mut self, format: Format) {
        debug!(
            "registered format {:?} with {}-byte magic",
            format.name,
            format.magic.len()
        );
        self.formats.push(format);
    }

    /// Registered formats, in lookup order.
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// First registered format whose magic prefixes `bytes`.
    pub fn sniff(&self, bytes: &[u8]) -> Option<&Format> {
        self.formats.iter().find(|f| f.matches(bytes))
    }

    /// Decode `bytes` and report the format name that handled them.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Picture, &'static str)> {
        if let Some(format) = self.sniff(bytes) {
            debug!("sniffed registered format {:?}", format.name);
            return Ok(((format.decode)(bytes)?, format.name));
        }

        let guessed = image::guess_format(bytes)
            .map_err(|e| BugError::Image(format!("Unknown image format: {}", e)))?;
        let name = guessed.extensions_str().first().copied().unwrap_or("image");
        debug!("falling back to image crate as {:?}", guessed);

        let image = image::load_from_memory_with_format(bytes, guessed)
            .map_err(|e| BugError::Image(format!("Failed to decode {}: {}", name, e)))?;
        Ok((Picture::Raster(image), name))
    }
}

/// Add the BUG format to `registry`, once per sentinel glyph.
pub fn register(registry: &mut Registry) {
    for magic in BUG_MAGIC {
        registry.register(Format {
            name: BUG_FORMAT,
            magic,
            decode: decode_bug,
        });
    }
}

fn decode_bug(bytes: &[u8]) -> Result<Picture> {
    reader::decode_bytes(bytes, Threshold::DEFAULT).map(Picture::Braille)
}
