//! The font allow-list
//!
//! A catalog names every family typecard is willing to load and the files
//! behind each weight. Adding a family is a configuration change:
//!
//! ```toml
//! font_dir = "/srv/fonts"
//!
//! [[family]]
//! name = "Suisse"
//! regular = "SuisseIntl-Regular.ttf"
//! bold = "SuisseIntl-Bold.ttf"
//!
//! # One file serves both weights
//! [[family]]
//! name = "Roboto"
//! regular = "Roboto-VariableFont.ttf"
//! ```
//!
//! # Environment Variables
//!
//! - `TYPECARD_CATALOG` - path of a TOML catalog to load instead of the defaults
//! - `TYPECARD_FONT_DIR` - overrides `font_dir` of whichever catalog is used

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use typecard_core::{
    error::{Result, TypecardError},
    types::Weight,
};

/// Names a TOML catalog file to load at startup
pub const CATALOG_ENV: &str = "TYPECARD_CATALOG";

/// Overrides the directory relative font paths resolve against
pub const FONT_DIR_ENV: &str = "TYPECARD_FONT_DIR";

/// One allow-listed family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    pub regular: PathBuf,
    /// `None` when a single file serves both weights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<PathBuf>,
}

impl FamilyConfig {
    pub fn new(name: impl Into<String>, regular: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            regular: regular.into(),
            bold: None,
        }
    }

    pub fn with_bold(mut self, bold: impl Into<PathBuf>) -> Self {
        self.bold = Some(bold.into());
        self
    }

    /// Whether both weights share one font file
    pub fn is_single_resource(&self) -> bool {
        self.bold.is_none()
    }

    /// The configured file for `weight`, before directory resolution
    pub fn file_for(&self, weight: Weight) -> &Path {
        match (weight, &self.bold) {
            (Weight::Bold, Some(bold)) => bold,
            _ => &self.regular,
        }
    }
}

/// The allow-list plus where its files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontCatalog {
    pub font_dir: PathBuf,
    #[serde(rename = "family")]
    pub families: Vec<FamilyConfig>,
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("fonts"),
            families: vec![
                FamilyConfig::new("Suisse", "SuisseIntl-Regular.ttf")
                    .with_bold("SuisseIntl-Bold.ttf"),
                FamilyConfig::new("Roboto", "Roboto-VariableFont.ttf"),
            ],
        }
    }
}

impl FontCatalog {
    /// A catalog with no families, rooted at `font_dir`
    pub fn empty(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
            families: Vec::new(),
        }
    }

    /// Adds a family, replacing any existing entry with the same name
    pub fn with_family(mut self, family: FamilyConfig) -> Self {
        self.families.retain(|f| f.name != family.name);
        self.families.push(family);
        self
    }

    pub fn with_font_dir(mut self, font_dir: impl Into<PathBuf>) -> Self {
        self.font_dir = font_dir.into();
        self
    }

    /// Parses a catalog from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| TypecardError::Config(format!("Invalid font catalog: {}", e)))
    }

    /// Loads a catalog from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            TypecardError::Config(format!(
                "Failed to read font catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::parse(&text)?;
        log::debug!(
            "Loaded font catalog {} with {} families",
            path.display(),
            catalog.families.len()
        );
        Ok(catalog)
    }

    /// Builds the catalog from `TYPECARD_CATALOG` and `TYPECARD_FONT_DIR`
    pub fn from_env() -> Result<Self> {
        let catalog = match std::env::var_os(CATALOG_ENV) {
            Some(path) => Self::load(PathBuf::from(path))?,
            None => Self::default(),
        };

        Ok(match std::env::var_os(FONT_DIR_ENV) {
            Some(dir) => {
                log::info!("Font directory overridden via {}", FONT_DIR_ENV);
                catalog.with_font_dir(PathBuf::from(dir))
            },
            None => catalog,
        })
    }

    /// Finds an allow-listed family by exact name
    pub fn family(&self, name: &str) -> Option<&FamilyConfig> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Names of every allow-listed family, in catalog order
    pub fn family_names(&self) -> Vec<String> {
        self.families.iter().map(|f| f.name.clone()).collect()
    }

    /// Full path of the file serving `weight` of `family`
    ///
    /// Absolute paths in the catalog are used as-is.
    pub fn resource_path(&self, family: &FamilyConfig, weight: Weight) -> PathBuf {
        self.font_dir.join(family.file_for(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = FontCatalog::default();
        assert_eq!(catalog.family_names(), vec!["Suisse", "Roboto"]);

        let suisse = catalog.family("Suisse").unwrap();
        assert!(!suisse.is_single_resource());
        assert_eq!(
            catalog.resource_path(suisse, Weight::Bold),
            PathBuf::from("fonts/SuisseIntl-Bold.ttf")
        );

        let roboto = catalog.family("Roboto").unwrap();
        assert!(roboto.is_single_resource());
        assert_eq!(
            catalog.resource_path(roboto, Weight::Bold),
            catalog.resource_path(roboto, Weight::Regular)
        );
    }

    #[test]
    fn test_family_lookup_is_exact() {
        let catalog = FontCatalog::default();
        assert!(catalog.family("suisse").is_none());
        assert!(catalog.family("Comic Sans").is_none());
    }

    #[test]
    fn test_parse_toml_catalog() {
        let catalog = FontCatalog::parse(
            r#"
            font_dir = "/srv/fonts"

            [[family]]
            name = "Inter"
            regular = "Inter-Regular.otf"
            bold = "Inter-Bold.otf"

            [[family]]
            name = "Mono"
            regular = "/opt/Mono.ttf"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.family_names(), vec!["Inter", "Mono"]);
        let inter = catalog.family("Inter").unwrap();
        assert_eq!(
            catalog.resource_path(inter, Weight::Bold),
            PathBuf::from("/srv/fonts/Inter-Bold.otf")
        );
        let mono = catalog.family("Mono").unwrap();
        assert_eq!(
            catalog.resource_path(mono, Weight::Bold),
            PathBuf::from("/opt/Mono.ttf")
        );
    }

    #[test]
    fn test_parse_partial_catalog_keeps_default_families() {
        let catalog = FontCatalog::parse("font_dir = \"assets\"").unwrap();
        assert_eq!(catalog.font_dir, PathBuf::from("assets"));
        assert_eq!(catalog.family_names(), vec!["Suisse", "Roboto"]);
    }

    #[test]
    fn test_parse_invalid_catalog() {
        let err = FontCatalog::parse("[[family]]\nregular = 3").unwrap_err();
        assert!(matches!(err, TypecardError::Config(_)));
    }

    #[test]
    fn test_load_missing_catalog() {
        let err = FontCatalog::load("/no/such/catalog.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/catalog.toml"));
    }

    #[test]
    fn test_with_family_replaces_by_name() {
        let catalog = FontCatalog::default()
            .with_family(FamilyConfig::new("Roboto", "Roboto-Regular.ttf").with_bold("Roboto-Bold.ttf"));
        assert_eq!(catalog.families.len(), 2);
        assert!(!catalog.family("Roboto").unwrap().is_single_resource());
    }
}
