//! Typecard rendering: measure the line, then draw it
//!
//! Two passes over the same runs:
//!
//! 1. [`layout::measure`] sums per-run advances and sizes the canvas
//! 2. [`renderer::render`] fills the canvas and draws each run with tiny-skia
//!
//! Both passes get run widths from [`layout::run_width`], so the pen in the
//! second pass always ends exactly where the first pass said it would, and
//! the right padding matches the left.

pub mod layout;
pub mod renderer;

pub use layout::{measure, run_width, Measurement, BASE_PADDING};
pub use renderer::render;

use typecard_core::{
    error::{RenderError, Result},
    TextRun,
};
use typecard_fontdb::FontHandle;

/// Picks the face a run is drawn with
pub(crate) fn face_for<'a>(
    run: &TextRun,
    regular: &'a FontHandle,
    bold: &'a FontHandle,
) -> &'a FontHandle {
    if run.bold {
        bold
    } else {
        regular
    }
}

/// The skrifa view of a face, or an error if its bytes no longer parse
pub(crate) fn outline_source(face: &FontHandle) -> Result<skrifa::FontRef<'_>> {
    face.font().skrifa().ok_or_else(|| {
        log::warn!("{}: font data does not parse", face.name());
        RenderError::PathBuildingFailed.into()
    })
}
