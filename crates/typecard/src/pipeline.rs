//! The end-to-end render path
//!
//! markup → font resolution → measure → draw → encode, all on the caller's
//! thread. The registry is the only state that outlives a call.

use std::sync::Arc;

use typecard_core::{markup, Bitmap, Exporter, RenderRequest, Result};
use typecard_export::PngExporter;
use typecard_fontdb::FontRegistry;

/// An encoded image ready to hand to a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Renders requests against a shared font registry
pub struct Pipeline {
    registry: Arc<FontRegistry>,
    exporter: PngExporter,
}

impl Pipeline {
    pub fn new(registry: Arc<FontRegistry>) -> Self {
        Self {
            registry,
            exporter: PngExporter::new(),
        }
    }

    pub fn registry(&self) -> &Arc<FontRegistry> {
        &self.registry
    }

    /// Renders `request` to straight RGBA pixels
    ///
    /// Both weights are resolved even when the text has no bold run, so an
    /// unsupported or missing family fails the same way for every text.
    pub fn render_bitmap(&self, request: &RenderRequest) -> Result<Bitmap> {
        let runs = markup::parse(&request.text);
        log::debug!(
            "Rendering {} runs in {} at {}px x{}",
            runs.len(),
            request.font_family,
            request.font_size,
            request.scale
        );

        let regular = self.registry.resolve(&request.font_family, false)?;
        let bold = self.registry.resolve(&request.font_family, true)?;

        let measurement = typecard_render::measure(
            &runs,
            &regular,
            &bold,
            request.scaled_font_size(),
            request.scale,
        )?;
        typecard_render::render(&runs, &regular, &bold, &measurement, request.background)
    }

    /// Renders `request` and encodes it as PNG
    pub fn render_png(&self, request: &RenderRequest) -> Result<RenderedImage> {
        let bitmap = self.render_bitmap(request)?;
        let bytes = self.exporter.export(&bitmap)?;
        log::debug!(
            "Exported {}x{} as {} ({} bytes)",
            bitmap.width,
            bitmap.height,
            self.exporter.name(),
            bytes.len()
        );

        Ok(RenderedImage {
            bytes,
            mime_type: self.exporter.mime_type(),
            width: bitmap.width,
            height: bitmap.height,
        })
    }
}
