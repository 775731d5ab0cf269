//! PNG export format
//!
//! Exports rendered bitmaps to PNG using the `image` crate.

use image::ImageEncoder;
use typecard_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::Bitmap,
};

/// Encode straight RGBA8 bitmap data as a PNG
pub fn encode_bitmap_to_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let expected_size = (bitmap.width as usize) * (bitmap.height as usize) * 4;
    if bitmap.data.len() != expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{} RGBA, got {}",
            expected_size,
            bitmap.width,
            bitmap.height,
            bitmap.data.len()
        ))
        .into());
    }

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(&bitmap.data, bitmap.width, bitmap.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for rendered bitmaps
///
/// ```
/// use typecard_core::Exporter;
/// use typecard_export::PngExporter;
///
/// let exporter = PngExporter::new();
/// assert_eq!(exporter.mime_type(), "image/png");
/// ```
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
