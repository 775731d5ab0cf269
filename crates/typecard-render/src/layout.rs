//! Line measurement and canvas geometry
//!
//! Runs are measured independently and laid end to end. There is no
//! shaping: each character maps to its nominal glyph through the cmap and
//! contributes that glyph's advance. Kerning across and within runs is not
//! applied.

use skrifa::{instance::Size, GlyphId, MetadataProvider};

use typecard_core::{error::Result, TextRun};
use typecard_fontdb::FontHandle;

use crate::{face_for, outline_source};

/// Padding on every side, in logical pixels, before scaling
pub const BASE_PADDING: f32 = 8.0;

/// Everything the renderer needs to size and fill the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Advance width of each run at `font_size`, in run order
    pub run_widths: Vec<f32>,
    pub total_width: f32,
    /// Scaled font size in pixels per em
    pub font_size: f32,
    /// Scaled padding in pixels
    pub padding: f32,
    pub width: u32,
    pub height: u32,
}

/// Padding at a given supersampling scale
pub fn padding_for(scale: u32) -> f32 {
    BASE_PADDING * scale as f32
}

/// Canvas size around a line of `total_width` pixels
///
/// Height follows the font size rather than the ink, so every line at the
/// same size gets the same height.
pub fn canvas_size(total_width: f32, font_size: f32, padding: f32) -> (u32, u32) {
    let width = (total_width + 2.0 * padding).ceil() as u32;
    let height = (font_size + 2.0 * padding).ceil() as u32;
    (width, height)
}

/// Nominal glyph and advance for every character of `text`
pub(crate) fn glyph_advances(
    face: &FontHandle,
    size: f32,
    text: &str,
) -> Result<Vec<(GlyphId, f32)>> {
    let font = outline_source(face)?;
    let charmap = font.charmap();
    let metrics = font.glyph_metrics(Size::new(size), face.location().coords());

    Ok(text
        .chars()
        .map(|ch| {
            let glyph_id = charmap.map(ch).unwrap_or_else(|| {
                log::warn!("{} has no glyph for {:?}", face.name(), ch);
                GlyphId::new(0)
            });
            (glyph_id, metrics.advance_width(glyph_id).unwrap_or(0.0))
        })
        .collect())
}

/// Width of `text` set in `face` at `size` pixels per em
///
/// The single source of run widths for both measuring and drawing.
pub fn run_width(face: &FontHandle, size: f32, text: &str) -> Result<f32> {
    Ok(glyph_advances(face, size, text)?
        .iter()
        .map(|(_, advance)| advance)
        .sum())
}

/// Measures the runs and sizes the canvas around them
///
/// `font_size` is already scaled; `scale` only scales the padding.
pub fn measure(
    runs: &[TextRun],
    regular: &FontHandle,
    bold: &FontHandle,
    font_size: f32,
    scale: u32,
) -> Result<Measurement> {
    let run_widths = runs
        .iter()
        .map(|run| run_width(face_for(run, regular, bold), font_size, &run.text))
        .collect::<Result<Vec<f32>>>()?;
    let total_width = run_widths.iter().sum();
    let padding = padding_for(scale);
    let (width, height) = canvas_size(total_width, font_size, padding);

    log::debug!(
        "Measured {} runs: text width {:.2}px, canvas {}x{}",
        runs.len(),
        total_width,
        width,
        height
    );

    Ok(Measurement {
        run_widths,
        total_width,
        font_size,
        padding,
        width,
        height,
    })
}
