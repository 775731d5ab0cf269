//! Bitmap rendering via tiny-skia
//!
//! Glyph outlines come from skrifa, are traced into a kurbo path per run,
//! and filled onto a single premultiplied pixmap with anti-aliasing. The
//! finished pixmap is handed back as straight RGBA.

use kurbo::{BezPath, PathEl};
use skrifa::{instance::Size, outline::DrawSettings, MetadataProvider};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use typecard_core::{
    error::{RenderError, Result},
    Background, Bitmap, Color, TextRun,
};
use typecard_fontdb::FontHandle;

use crate::{
    face_for,
    layout::{glyph_advances, run_width, Measurement},
    outline_source,
};

/// Largest canvas side we agree to allocate
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Largest canvas area, in pixels (128 MiB of RGBA per buffer)
pub const MAX_CANVAS_PIXELS: u64 = 32 * 1024 * 1024;

/// Text is always drawn in this color
pub const TEXT_COLOR: Color = Color::black();

/// Draws the runs onto a canvas sized by `measurement`
///
/// Transparent backgrounds leave the canvas untouched; solid ones fill
/// every pixel before drawing. Runs go left to right starting at the left
/// padding, each vertically centred on the canvas midline. Either the
/// whole bitmap is produced or an error is returned.
pub fn render(
    runs: &[TextRun],
    regular: &FontHandle,
    bold: &FontHandle,
    measurement: &Measurement,
    background: Background,
) -> Result<Bitmap> {
    let (width, height) = (measurement.width, measurement.height);
    check_canvas(width, height)?;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;

    if let Background::Solid(c) = background {
        pixmap.fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    let mut paint = Paint::default();
    paint.set_color_rgba8(TEXT_COLOR.r, TEXT_COLOR.g, TEXT_COLOR.b, TEXT_COLOR.a);
    paint.anti_alias = true;

    let size = measurement.font_size;
    let midline = height as f32 / 2.0;
    let mut cursor = measurement.padding;

    for (i, run) in runs.iter().enumerate() {
        let face = face_for(run, regular, bold);
        let baseline = middle_baseline(face, size, midline)?;

        let mut path = BezPath::new();
        trace_run(face, size, &run.text, cursor, baseline, &mut path)?;
        if let Some(skia_path) = to_skia_path(&path) {
            pixmap.fill_path(&skia_path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let advance = run_width(face, size, &run.text)?;
        debug_assert_eq!(Some(&advance), measurement.run_widths.get(i));
        cursor += advance;
    }

    log::debug!("Rendered {} runs into {}x{}", runs.len(), width, height);
    Ok(to_bitmap(&pixmap))
}

/// Rejects canvases too large on either side or in total area
fn check_canvas(width: u32, height: u32) -> Result<()> {
    let too_large = width > MAX_CANVAS_SIZE
        || height > MAX_CANVAS_SIZE
        || width as u64 * height as u64 > MAX_CANVAS_PIXELS;
    if too_large {
        log::warn!("Refusing to allocate a {}x{} canvas", width, height);
        return Err(RenderError::InvalidDimensions { width, height }.into());
    }
    Ok(())
}

/// Baseline that puts the em box midline on `midline`
///
/// Font y grows upwards and descent is negative, so the em box centre sits
/// `(ascent + descent) / 2` above the baseline.
fn middle_baseline(face: &FontHandle, size: f32, midline: f32) -> Result<f32> {
    let font = outline_source(face)?;
    let metrics = font.metrics(Size::new(size), face.location().coords());
    Ok(midline + (metrics.ascent + metrics.descent) / 2.0)
}

/// Appends the outlines of `text` to `path`, pen starting at `(x, baseline)`
fn trace_run(
    face: &FontHandle,
    size: f32,
    text: &str,
    x: f32,
    baseline: f32,
    path: &mut BezPath,
) -> Result<()> {
    let font = outline_source(face)?;
    let outlines = font.outline_glyphs();
    let mut pen_x = x;

    for (glyph_id, advance) in glyph_advances(face, size, text)? {
        if let Some(glyph) = outlines.get(glyph_id) {
            let settings = DrawSettings::unhinted(Size::new(size), face.location().coords());
            let mut pen = PathPen {
                path: &mut *path,
                origin_x: pen_x as f64,
                baseline: baseline as f64,
            };
            glyph.draw(settings, &mut pen).map_err(|e| {
                log::warn!("{}: failed to draw glyph {:?}: {:?}", face.name(), glyph_id, e);
                RenderError::PathBuildingFailed
            })?;
        }
        pen_x += advance;
    }
    Ok(())
}

/// Translate kurbo's path format into tiny-skia's; `None` for empty paths
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Premultiplied pixmap to straight RGBA
fn to_bitmap(pixmap: &Pixmap) -> Bitmap {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Bitmap {
        width: pixmap.width(),
        height: pixmap.height(),
        data,
    }
}

/// Bridge between skrifa's outline commands and a kurbo path on the canvas
///
/// Outlines arrive scaled to pixels with y up; the pen shifts them to the
/// glyph origin and flips y for the y-down canvas.
struct PathPen<'a> {
    path: &'a mut BezPath,
    origin_x: f64,
    baseline: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (self.origin_x + x as f64, self.baseline - y as f64)
    }
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.point(cx0, cy0);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.point(cx0, cy0);
        let c1 = self.point(cx1, cy1);
        let p = self.point(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_canvas_limits() {
        assert!(check_canvas(1, 1).is_ok());
        assert!(check_canvas(MAX_CANVAS_SIZE, 1024).is_ok());
        assert!(check_canvas(MAX_CANVAS_SIZE + 1, 10).is_err());
        assert!(check_canvas(10, MAX_CANVAS_SIZE + 1).is_err());

        // Each side fits, the area does not
        let err = check_canvas(16_000, 16_000).unwrap_err();
        assert!(err.to_string().contains("16000x16000"));
    }

    #[test]
    fn test_empty_path_has_no_skia_path() {
        assert!(to_skia_path(&BezPath::new()).is_none());
    }

    #[test]
    fn test_pen_flips_and_offsets() {
        let mut path = BezPath::new();
        let mut pen = PathPen {
            path: &mut path,
            origin_x: 10.0,
            baseline: 50.0,
        };
        skrifa::outline::OutlinePen::move_to(&mut pen, 1.0, 5.0);
        skrifa::outline::OutlinePen::line_to(&mut pen, 3.0, -2.0);
        skrifa::outline::OutlinePen::close(&mut pen);

        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(els[0], PathEl::MoveTo((11.0, 45.0).into()));
        assert_eq!(els[1], PathEl::LineTo((13.0, 52.0).into()));
        assert_eq!(els[2], PathEl::ClosePath);
    }

    #[test]
    fn test_to_bitmap_demultiplies() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        let bitmap = to_bitmap(&pixmap);
        assert_eq!(bitmap.width, 2);
        assert_eq!(bitmap.data.len(), 16);
        assert_eq!(bitmap.pixel(1, 1), Some([255, 0, 0, 255]));

        let empty = to_bitmap(&Pixmap::new(1, 1).unwrap());
        assert_eq!(empty.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
