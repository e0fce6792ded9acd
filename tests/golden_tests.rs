//! # Golden Tests
//!
//! These tests ensure that encoding and decoding produce consistent output.
//!
//! ## Test Coverage
//!
//! - **Text round-trip** (`.bug`): decoding a fixture and re-encoding it must
//!   reproduce the fixture byte for byte.
//! - **Raster conversion** (`.png` → `.bug`): a PNG decoded by the `image`
//!   crate, thresholded and encoded must match its `.bug` fixture.
//!
//! `ring` is 40×24 with gray levels on both sides of the default cutoff;
//! `odd` is 5×7, so its last cell column and row are partial.

use bug::codec::format::Registry;
use bug::codec::{self, Encoder, Picture};
use bug::{BugError, PixelBuffer, Threshold};
use pretty_assertions::assert_eq;
use std::fs;

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn read_golden(name: &str, ext: &str) -> Vec<u8> {
    let path = format!("{}/{}.{}", GOLDEN_DIR, name, ext);
    fs::read(&path).unwrap_or_else(|e| panic!("Golden file not found: {}: {}", path, e))
}

/// Compare BUG text against a golden file
fn check_golden(name: &str, data: &[u8]) {
    let golden = read_golden(name, "bug");
    let actual = String::from_utf8_lossy(data);
    let expected = String::from_utf8_lossy(&golden);
    assert_eq!(
        actual, expected,
        "Golden file content mismatch for {}/{}.bug",
        GOLDEN_DIR, name
    );
}

fn encode_to_vec(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::new();
    codec::encode(&mut out, buffer).expect("Encode failed");
    out
}

/// Decode a PNG fixture through the registry and encode it as BUG text.
fn png_to_bug(name: &str, threshold: Threshold) -> Vec<u8> {
    let (picture, format) = Registry::with_bug()
        .decode(&read_golden(name, "png"))
        .expect("PNG decode failed");
    assert_eq!(format, "png");

    let mut out = Vec::new();
    Encoder::new(&mut out)
        .with_threshold(threshold)
        .encode_picture(picture)
        .expect("Encode failed");
    out
}

// ============================================================================
// TEXT ROUND-TRIP TESTS
// ============================================================================

#[test]
fn test_decode_encode_ring() {
    let buffer = codec::decode(read_golden("ring", "bug").as_slice()).unwrap();
    assert_eq!((buffer.cell_width(), buffer.cell_height()), (20, 6));
    check_golden("ring", &encode_to_vec(&buffer));
}

#[test]
fn test_decode_encode_odd() {
    let buffer = codec::decode(read_golden("odd", "bug").as_slice()).unwrap();
    // Decoded size is whole cells: the 5x7 source padded to 6x8.
    assert_eq!(buffer.bounds().width, 6);
    assert_eq!(buffer.bounds().height, 8);
    check_golden("odd", &encode_to_vec(&buffer));
}

#[test]
fn test_registry_routes_bug_text() {
    let (picture, format) = Registry::with_bug()
        .decode(&read_golden("ring", "bug"))
        .unwrap();
    assert_eq!(format, "bug");
    assert!(matches!(picture, Picture::Braille(_)));

    let buffer = codec::convert(picture, Threshold::DEFAULT);
    check_golden("ring", &encode_to_vec(&buffer));
}

// ============================================================================
// RASTER CONVERSION TESTS
// ============================================================================

#[test]
fn test_png_to_bug_ring() {
    check_golden("ring", &png_to_bug("ring", Threshold::DEFAULT));
}

#[test]
fn test_png_to_bug_ring_inverted() {
    check_golden(
        "ring_inverted",
        &png_to_bug("ring", Threshold::DEFAULT.inverse()),
    );
}

#[test]
fn test_png_to_bug_odd() {
    check_golden("odd", &png_to_bug("odd", Threshold::DEFAULT));
}

#[test]
fn test_png_and_bug_agree_on_pixels() {
    let (picture, _) = Registry::with_bug()
        .decode(&read_golden("odd", "png"))
        .unwrap();
    let converted = codec::convert(picture, Threshold::DEFAULT);
    let decoded = codec::decode(read_golden("odd", "bug").as_slice()).unwrap();

    for y in 0..7 {
        for x in 0..5 {
            assert_eq!(
                converted.is_opaque(x, y),
                decoded.is_opaque(x, y),
                "pixel ({}, {})",
                x,
                y
            );
        }
    }
}

// ============================================================================
// ERROR TESTS
// ============================================================================

#[test]
fn test_truncated_fixture_is_format_error() {
    let mut text = read_golden("ring", "bug");
    // Drop the final glyph's last byte, leaving an incomplete UTF-8 sequence.
    text.truncate(text.len() - 2);
    assert!(matches!(
        codec::decode(text.as_slice()),
        Err(BugError::Format(_))
    ));
}

#[test]
fn test_widened_row_is_format_error() {
    let mut text = String::from_utf8(read_golden("odd", "bug")).unwrap();
    text.push_str("\u{2800}\u{2800}\u{2800}\u{2800}\n");
    assert!(matches!(
        codec::decode(text.as_bytes()),
        Err(BugError::Format(_))
    ));
}
