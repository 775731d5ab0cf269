//! Typecard Core: the shared vocabulary of the text-to-PNG pipeline
//!
//! A request travels through four stages before it leaves as PNG bytes:
//!
//! 1. **Markup** - `__` toggles split the text into bold and regular runs
//! 2. **Font resolution** - each weight maps to a registered font face
//! 3. **Layout** - runs are measured and the canvas is sized around them
//! 4. **Rendering** - the canvas is filled and the runs are drawn left to right
//!
//! This crate holds the types every stage agrees on, the error hierarchy,
//! the [`Exporter`] contract, and the markup parser itself. Font loading,
//! measurement, and drawing live in their own crates.
//!
//! ```
//! use typecard_core::{markup, RenderRequest};
//!
//! let request = RenderRequest::default();
//! assert_eq!(request.font_family, "Suisse");
//!
//! let runs = markup::parse("Hello __World__");
//! assert_eq!(runs.len(), 2);
//! assert!(runs[1].bold);
//! ```

pub mod color;
pub mod error;
pub mod markup;
pub mod traits;

pub use color::{Background, Color};
pub use error::{Result, TypecardError};

use error::RequestError;
pub use traits::Exporter;

/// The data structures that flow between stages
pub mod types {
    use std::fmt;

    /// Which face of a family to draw with
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Weight {
        Regular,
        Bold,
    }

    impl Weight {
        /// Maps the markup boldness flag onto a weight
        pub const fn from_bold(bold: bool) -> Self {
            if bold {
                Self::Bold
            } else {
                Self::Regular
            }
        }

        pub const fn is_bold(self) -> bool {
            matches!(self, Self::Bold)
        }
    }

    impl fmt::Display for Weight {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Regular => f.write_str("regular"),
                Self::Bold => f.write_str("bold"),
            }
        }
    }

    /// A logical font: family name plus weight
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct FontSpec {
        pub family: String,
        pub weight: Weight,
    }

    impl FontSpec {
        pub fn new(family: impl Into<String>, weight: Weight) -> Self {
            Self {
                family: family.into(),
                weight,
            }
        }
    }

    /// A contiguous, non-empty piece of text sharing one boldness value
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TextRun {
        pub text: String,
        pub bold: bool,
    }

    impl TextRun {
        pub fn new(text: impl Into<String>, bold: bool) -> Self {
            Self {
                text: text.into(),
                bold,
            }
        }

        pub const fn weight(&self) -> Weight {
            Weight::from_bold(self.bold)
        }
    }

    /// Straight (non-premultiplied) RGBA8 pixels, row-major
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Bitmap {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl Bitmap {
        /// RGBA value at `(x, y)`, or `None` outside the bitmap
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let idx = ((y * self.width + x) * 4) as usize;
            let px = self.data.get(idx..idx + 4)?;
            Some([px[0], px[1], px[2], px[3]])
        }
    }
}

pub use types::{Bitmap, FontSpec, TextRun, Weight};

/// Text rendered when a request does not name any
pub const DEFAULT_TEXT: &str = "Hello World";

/// Family used when a request does not name one
pub const DEFAULT_FONT_FAMILY: &str = "Suisse";

/// Base font size in logical pixels
pub const DEFAULT_FONT_SIZE: u32 = 24;

/// Supersampling multiplier applied when a request does not name one
pub const DEFAULT_SCALE: u32 = 2;

/// Everything needed to render one image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Text to draw, possibly containing `__` bold toggles
    pub text: String,
    /// Logical family name, checked against the font allow-list
    pub font_family: String,
    /// Base font size in logical pixels
    pub font_size: u32,
    pub background: Background,
    /// Supersampling factor, at least 1
    pub scale: u32,
}

impl RenderRequest {
    /// Builds a request from named string parameters
    ///
    /// Recognised names are `text`, `font`, `font_size`, `background_color`,
    /// and `scale`; anything else is ignored, and a name given twice keeps
    /// its last value. Missing parameters take their defaults. Integers must
    /// be at least 1, and `font_size * scale` must fit in a `u32`.
    pub fn from_params<I, K, V>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (name, value) in params {
            let (name, value) = (name.as_ref(), value.as_ref());
            match name {
                "text" => request.text = value.to_string(),
                "font" => request.font_family = value.to_string(),
                "font_size" => request.font_size = parse_positive(name, value)?,
                "background_color" => request.background = value.parse()?,
                "scale" => request.scale = parse_positive(name, value)?,
                _ => log::trace!("ignoring unknown parameter {:?}", name),
            }
        }

        if request.font_size.checked_mul(request.scale).is_none() {
            return Err(RequestError::InvalidParameter {
                name: "scale".to_string(),
                value: request.scale.to_string(),
            }
            .into());
        }
        Ok(request)
    }

    /// Font size after supersampling
    ///
    /// Computed in floating point, so oversized inputs give a huge size
    /// that the renderer rejects rather than an overflow.
    pub fn scaled_font_size(&self) -> f32 {
        self.font_size as f32 * self.scale as f32
    }
}

fn parse_positive(name: &str, value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RequestError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
        }
        .into()),
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            background: Background::Transparent,
            scale: DEFAULT_SCALE,
        }
    }
}
