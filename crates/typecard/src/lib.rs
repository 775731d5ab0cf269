//! Typecard: short styled text in, tightly cropped PNG out
//!
//! ```no_run
//! use std::sync::Arc;
//! use typecard::{FontCatalog, FontRegistry, Pipeline, RenderRequest};
//!
//! let registry = Arc::new(FontRegistry::new(FontCatalog::from_env()?));
//! let pipeline = Pipeline::new(registry);
//!
//! let request = RenderRequest {
//!     text: "Hello __World__".into(),
//!     ..RenderRequest::default()
//! };
//! let image = pipeline.render_png(&request)?;
//! std::fs::write("hello.png", &image.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Hosts that serve requests hand raw parameters to [`adapter::handle`],
//! which never fails: errors become an opaque 500 response.

use std::sync::{Arc, OnceLock};

pub mod adapter;
pub mod pipeline;

pub use adapter::{handle, Response};
pub use pipeline::{Pipeline, RenderedImage};

pub use typecard_core::{
    error, markup, Background, Bitmap, Color, RenderRequest, Result, TextRun, TypecardError,
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_SCALE, DEFAULT_TEXT,
};
pub use typecard_fontdb::{FamilyConfig, FontCatalog, FontHandle, FontRegistry};

static SHARED_REGISTRY: OnceLock<Arc<FontRegistry>> = OnceLock::new();

/// A registry that lives for the rest of the process
///
/// Built from [`FontCatalog::from_env`] on first call. If the environment
/// names a catalog that cannot be loaded, the error is logged and the
/// built-in catalog is used instead.
pub fn shared_registry() -> Arc<FontRegistry> {
    SHARED_REGISTRY
        .get_or_init(|| {
            let catalog = FontCatalog::from_env().unwrap_or_else(|e| {
                log::error!("{}; falling back to the built-in font catalog", e);
                FontCatalog::default()
            });
            Arc::new(FontRegistry::new(catalog))
        })
        .clone()
}
