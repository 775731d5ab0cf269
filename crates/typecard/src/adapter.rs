//! Request/response adapter for hosting the pipeline behind HTTP
//!
//! Query parameters go in, a status/header/body triple comes out. Nothing
//! here fails: every error is logged and collapsed into one opaque 500 so
//! callers never see font paths or parser messages.

use serde::Serialize;
use typecard_core::RenderRequest;

use crate::pipeline::Pipeline;

/// Cache directive attached to every successful image
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// The only message a failed request ever reports
pub const GENERIC_ERROR: &str = "Failed to generate image";

const JSON_MIME: &str = "application/json";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// What the host should send back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    /// Present on success only
    pub cache_control: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Response {
    fn image(bytes: Vec<u8>, mime_type: &'static str) -> Self {
        Self {
            status: 200,
            content_type: mime_type,
            cache_control: Some(CACHE_CONTROL),
            body: bytes,
        }
    }

    fn failure() -> Self {
        let body = serde_json::to_vec(&ErrorBody {
            error: GENERIC_ERROR,
        })
        .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, GENERIC_ERROR).into_bytes());

        Self {
            status: 500,
            content_type: JSON_MIME,
            cache_control: None,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parses `params`, renders, and wraps the outcome as a [`Response`]
pub fn handle<I, K, V>(pipeline: &Pipeline, params: I) -> Response
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let result = RenderRequest::from_params(params)
        .and_then(|request| pipeline.render_png(&request));

    match result {
        Ok(image) => {
            log::info!(
                "Served {}x{} image ({} bytes)",
                image.width,
                image.height,
                image.bytes.len()
            );
            Response::image(image.bytes, image.mime_type)
        },
        Err(e) => {
            log::error!("Image generation failed: {}", e);
            Response::failure()
        },
    }
}
