//! # Rendering Module
//!
//! Color reduction ahead of Braille packing.
//!
//! ## Modules
//!
//! - [`threshold`]: luminance cutoff binarization with sign-encoded inversion

pub mod threshold;
