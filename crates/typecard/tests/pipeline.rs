// this_file: crates/typecard/tests/pipeline.rs

//! End-to-end checks: parameters in, decoded PNG out

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use typecard::error::FontLoadError;
use typecard::{
    handle, FamilyConfig, FontCatalog, FontRegistry, Pipeline, RenderRequest, TypecardError,
};

const REGULAR: &str = "DejaVuSans.ttf";
const BOLD: &str = "DejaVuSans-Bold.ttf";

fn test_font_dir() -> Option<PathBuf> {
    let candidates = [
        std::env::var_os("TYPECARD_TEST_FONT_DIR").map(PathBuf::from),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fonts")),
        Some(PathBuf::from("/usr/share/fonts/truetype/dejavu")),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|dir| dir.join(REGULAR).is_file() && dir.join(BOLD).is_file())
}

/// A pipeline whose `Suisse` family is served by DejaVu Sans
fn test_pipeline() -> Option<Pipeline> {
    let Some(dir) = test_font_dir() else {
        eprintln!("Skipping test: DejaVu test fonts not found");
        return None;
    };
    let catalog = FontCatalog::empty(dir)
        .with_family(FamilyConfig::new("Suisse", REGULAR).with_bold(BOLD))
        .with_family(FamilyConfig::new("Roboto", REGULAR));
    Some(Pipeline::new(Arc::new(FontRegistry::new(catalog))))
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .expect("valid PNG")
        .to_rgba8()
}

fn corners(img: &RgbaImage) -> [[u8; 4]; 4] {
    let (w, h) = img.dimensions();
    [
        img.get_pixel(0, 0).0,
        img.get_pixel(w - 1, 0).0,
        img.get_pixel(0, h - 1).0,
        img.get_pixel(w - 1, h - 1).0,
    ]
}

#[test]
fn test_hi_at_default_scale_matches_canvas_formula() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest {
        text: "Hi".into(),
        ..RenderRequest::default()
    };
    let image = pipeline.render_png(&request).unwrap();
    let img = decode(&image.bytes);

    let regular = pipeline.registry().resolve("Suisse", false).unwrap();
    let text_width = typecard_render::run_width(&regular, 48.0, "Hi").unwrap();
    let expected_width = (text_width + 32.0).ceil() as u32;

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(img.dimensions(), (image.width, image.height));
    assert_eq!(img.height(), 80);
    assert!(
        img.width().abs_diff(expected_width) <= 1,
        "width {} vs expected {}",
        img.width(),
        expected_width
    );
}

#[test]
fn test_transparent_background_leaves_corners_clear() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let image = pipeline.render_png(&RenderRequest::default()).unwrap();
    let img = decode(&image.bytes);

    for px in corners(&img) {
        assert_eq!(px[3], 0, "corner should be fully transparent");
    }
    assert!(img.pixels().any(|p| p.0[3] > 0), "text should leave ink");
}

#[test]
fn test_solid_background_fills_corners() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest::from_params([("background_color", "#ff8800")]).unwrap();
    let img = decode(&pipeline.render_png(&request).unwrap().bytes);

    for px in corners(&img) {
        assert_eq!(px, [255, 136, 0, 255]);
    }
}

#[test]
fn test_markup_request_renders_at_scale_one() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest::from_params([
        ("text", "Hello__World__!"),
        ("font_size", "20"),
        ("scale", "1"),
        ("background_color", "white"),
    ])
    .unwrap();
    let image = pipeline.render_png(&request).unwrap();
    let img = decode(&image.bytes);

    assert_eq!(img.height(), 36);
    let plain = pipeline
        .render_png(&RenderRequest {
            text: "HelloWorld!".into(),
            ..request.clone()
        })
        .unwrap();
    assert!(
        image.width > plain.width,
        "bold middle run should widen the image ({} vs {})",
        image.width,
        plain.width
    );
}

#[test]
fn test_single_resource_family_renders_both_weights() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest::from_params([("font", "Roboto"), ("text", "a __b__")]).unwrap();
    let image = pipeline.render_png(&request).unwrap();
    assert!(image.width > 32);
    assert_eq!(pipeline.registry().stats().files_read, 1);
}

#[test]
fn test_unsupported_font_is_rejected() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest::from_params([("font", "Helvetica")]).unwrap();
    let err = pipeline.render_png(&request).unwrap_err();

    match err {
        TypecardError::FontLoad(FontLoadError::UnsupportedFont { family, supported }) => {
            assert_eq!(family, "Helvetica");
            assert_eq!(supported, vec!["Suisse".to_string(), "Roboto".to_string()]);
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_adapter_serves_png_with_cache_directive() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let response = handle(&pipeline, [("text", "Hi"), ("scale", "1")]);

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "image/png");
    assert_eq!(
        response.cache_control,
        Some("public, max-age=31536000, immutable")
    );
    let img = decode(&response.body);
    assert_eq!(img.height(), 40);
}

#[test]
fn test_adapter_hides_error_detail() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let response = handle(&pipeline, [("font", "Helvetica")]);

    assert_eq!(response.status, 500);
    assert_eq!(response.content_type, "application/json");
    let body = String::from_utf8(response.body).unwrap();
    assert_eq!(body, r#"{"error":"Failed to generate image"}"#);
    assert!(!body.contains("Helvetica"));
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let pipeline = Arc::new(pipeline);

    let sizes: Vec<(u32, u32)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = Arc::clone(&pipeline);
                s.spawn(move || {
                    let image = pipeline.render_png(&RenderRequest::default()).unwrap();
                    (image.width, image.height)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(sizes.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(pipeline.registry().stats().files_read, 2);
}

#[test]
fn test_adapter_rejects_overflowing_scaled_size() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let response = handle(&pipeline, [("font_size", "2147483648"), ("scale", "2")]);

    assert_eq!(response.status, 500);
    assert_eq!(response.content_type, "application/json");
}

#[test]
fn test_oversized_canvas_is_refused() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    // Each side is under the per-side cap; the area is not
    let request = RenderRequest {
        text: "Hi".into(),
        font_size: 8_000,
        scale: 1,
        ..RenderRequest::default()
    };
    let err = pipeline.render_png(&request).unwrap_err();
    assert!(matches!(err, TypecardError::Rendering(_)), "got {err}");

    let response = handle(&pipeline, [("text", "Hi"), ("font_size", "8000"), ("scale", "1")]);
    assert_eq!(response.status, 500);
}

#[test]
fn test_unscaled_overflow_from_struct_is_refused() {
    let Some(pipeline) = test_pipeline() else {
        return;
    };
    let request = RenderRequest {
        font_size: u32::MAX,
        scale: 2,
        ..RenderRequest::default()
    };
    assert!(pipeline.render_png(&request).is_err());
}
