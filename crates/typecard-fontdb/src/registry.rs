//! Process-lifetime font registration
//!
//! The registry is the only shared mutable state in the pipeline. It is
//! append-only: a face, once registered, stays until the registry is
//! dropped. Every file is read from disk at most once per registry, even
//! when a single file backs both weights of a family.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use skrifa::instance::Location;

use typecard_core::{
    error::{FontLoadError, Result},
    types::{FontSpec, Weight},
};

use crate::{catalog::FontCatalog, Font};

/// Weight coordinate applied to the bold face of a variable font
const BOLD_WGHT: f32 = 700.0;

/// A registered face, ready for measuring and drawing
///
/// Cloning is cheap: the font bytes sit behind an `Arc`.
#[derive(Clone)]
pub struct FontHandle {
    name: String,
    spec: FontSpec,
    font: Arc<Font>,
    location: Location,
}

impl FontHandle {
    fn new(spec: FontSpec, font: Arc<Font>, location: Location) -> Self {
        Self {
            name: backend_name(&spec.family, spec.weight),
            spec,
            font,
            location,
        }
    }

    /// Registry-unique name: the family, with `-Bold` appended for bold
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &FontSpec {
        &self.spec
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    /// Variation location to measure and draw with
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("name", &self.name)
            .field("font", &self.font.path())
            .finish()
    }
}

/// The name a face is registered under
pub fn backend_name(family: &str, weight: Weight) -> String {
    match weight {
        Weight::Regular => family.to_string(),
        Weight::Bold => format!("{}-Bold", family),
    }
}

/// Snapshot of what the registry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Registered `(family, weight)` faces
    pub faces: usize,
    /// Font files read from disk
    pub files_read: usize,
}

#[derive(Default)]
struct Tables {
    faces: HashMap<FontSpec, FontHandle>,
    files: HashMap<PathBuf, Arc<Font>>,
}

/// Resolves `(family, weight)` to a loaded face, registering on first use
pub struct FontRegistry {
    catalog: FontCatalog,
    tables: RwLock<Tables>,
}

impl FontRegistry {
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            tables: RwLock::new(Tables::default()),
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Allow-listed family names
    pub fn supported_families(&self) -> Vec<String> {
        self.catalog.family_names()
    }

    /// Returns the face for `family` at the requested weight
    ///
    /// Registered faces come straight from the cache. Otherwise the family
    /// must be allow-listed and its file must exist; the face is loaded,
    /// registered, and returned. Concurrent first calls for one key
    /// register it exactly once.
    pub fn resolve(&self, family: &str, bold: bool) -> Result<FontHandle> {
        let spec = FontSpec::new(family, Weight::from_bold(bold));

        if let Some(handle) = self.tables.read().faces.get(&spec) {
            return Ok(handle.clone());
        }

        let mut tables = self.tables.write();
        // Another caller may have registered it while we waited
        if let Some(handle) = tables.faces.get(&spec) {
            return Ok(handle.clone());
        }

        let config = self
            .catalog
            .family(family)
            .ok_or_else(|| FontLoadError::UnsupportedFont {
                family: family.to_string(),
                supported: self.catalog.family_names(),
            })?;

        let path = self.catalog.resource_path(config, spec.weight);
        let font = Self::load_file(&mut tables.files, family, &path)?;

        let variable_bold =
            spec.weight.is_bold() && config.is_single_resource() && font.has_axis("wght");
        let location = if variable_bold {
            font.location(&[("wght", BOLD_WGHT)])
        } else {
            Location::default()
        };

        let handle = FontHandle::new(spec.clone(), font, location);
        log::info!("Registered font {} from {}", handle.name(), path.display());
        tables.faces.insert(spec, handle.clone());
        Ok(handle)
    }

    /// Reads a font file unless an earlier registration already did
    fn load_file(
        files: &mut HashMap<PathBuf, Arc<Font>>,
        family: &str,
        path: &Path,
    ) -> Result<Arc<Font>> {
        if let Some(font) = files.get(path) {
            return Ok(font.clone());
        }

        if !path.is_file() {
            return Err(FontLoadError::FileMissing {
                family: family.to_string(),
                path: path.to_path_buf(),
            }
            .into());
        }

        let font = Arc::new(Font::from_file(path)?);
        log::debug!(
            "Read {} ({} bytes, {} units/em)",
            path.display(),
            font.data().len(),
            font.units_per_em()
        );
        files.insert(path.to_path_buf(), font.clone());
        Ok(font)
    }

    pub fn stats(&self) -> RegistryStats {
        let tables = self.tables.read();
        RegistryStats {
            faces: tables.faces.len(),
            files_read: tables.files.len(),
        }
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new(FontCatalog::default())
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("catalog", &self.catalog)
            .field("stats", &self.stats())
            .finish()
    }
}
