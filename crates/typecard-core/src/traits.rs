//! The contract for the last stage of the pipeline

use crate::{error::Result, types::Bitmap};

/// Encodes a finished bitmap into bytes a caller can ship
///
/// ```ignore
/// struct RawExporter;
///
/// impl Exporter for RawExporter {
///     fn name(&self) -> &'static str { "raw" }
///     fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> { Ok(bitmap.data.clone()) }
///     fn extension(&self) -> &'static str { "rgba" }
///     fn mime_type(&self) -> &'static str { "application/octet-stream" }
/// }
/// ```
pub trait Exporter: Send + Sync {
    /// Used in logs
    fn name(&self) -> &'static str;

    /// Encode the bitmap as bytes
    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>>;

    /// File extension for written output
    fn extension(&self) -> &'static str;

    /// MIME type announced to the caller
    fn mime_type(&self) -> &'static str;
}
