//! Where fonts come to life: loading and registration for typecard
//!
//! Three pieces live here:
//!
//! - [`Font`] - one font file, read once and kept in memory
//! - [`FontCatalog`] - the allow-list of families and their files
//! - [`FontRegistry`] - resolves `(family, weight)` to a [`FontHandle`],
//!   loading each face the first time it is asked for and never again
//!
//! Fonts store their raw data and create a parser view on demand, so a
//! `Font` can be shared across threads behind an `Arc` without lifetimes
//! leaking into callers.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::MetadataProvider;

use typecard_core::error::{FontLoadError, Result};

pub mod catalog;
pub mod registry;

pub use catalog::{FamilyConfig, FontCatalog};
pub use registry::{FontHandle, FontRegistry, RegistryStats};

/// A font file that's been brought into memory
pub struct Font {
    data: Vec<u8>,
    path: PathBuf,
    units_per_em: u16,
}

impl Font {
    /// Reads and validates a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Self::from_data(data, path)
    }

    /// Validates raw font bytes; `path` is kept for diagnostics only
    pub fn from_data(data: Vec<u8>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let font_ref = ReadFontRef::new(&data).map_err(|_| FontLoadError::InvalidData {
            path: path.clone(),
        })?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(Font {
            data,
            path,
            units_per_em,
        })
    }

    /// Creates a parser view on demand
    ///
    /// The data was validated at load time, so `None` only shows up for
    /// bytes that stopped parsing, which cannot happen for an immutable buffer.
    pub fn skrifa(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::new(&self.data).ok()
    }

    /// Raw font bytes as they live in the file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Where the bytes came from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Whether the font exposes the given variation axis, e.g. `wght`
    pub fn has_axis(&self, tag: &str) -> bool {
        self.skrifa()
            .map(|font| font.axes().iter().any(|axis| axis.tag().to_string() == tag))
            .unwrap_or(false)
    }

    /// Variation location for the given user-space settings
    ///
    /// Static fonts and unknown axes give the default location.
    pub fn location(&self, settings: &[(&str, f32)]) -> skrifa::instance::Location {
        match self.skrifa() {
            Some(font) if !settings.is_empty() => font.axes().location(settings.iter().copied()),
            _ => skrifa::instance::Location::default(),
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("path", &self.path)
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}
