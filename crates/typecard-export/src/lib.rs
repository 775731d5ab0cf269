//! Export module for typecard
//!
//! Rendered bitmaps leave the pipeline as PNG bytes.

pub mod png;

pub use png::{encode_bitmap_to_png, PngExporter};
