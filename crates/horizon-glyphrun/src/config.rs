//! Configuration for the font library and the sessions it opens.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlyphRunError, GlyphRunResult};

/// Configuration options for [`FontLibrary`](crate::FontLibrary) initialization.
///
/// Every field has a default, so a TOML document only needs the keys it
/// changes:
///
/// ```
/// use horizon_glyphrun::LibraryConfig;
///
/// let config = LibraryConfig::from_toml_str("default_dpi = 96.0").unwrap();
/// assert_eq!(config.default_dpi, 96.0);
/// assert_eq!(config.default_point_size, 12.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Character size applied when a session is opened, in points.
    pub default_point_size: f64,
    /// Resolution applied when a session is opened, in dots per inch.
    pub default_dpi: f64,
    /// Face to select from font collections (TTC/OTC).
    pub face_index: u32,
    /// Rasterize with anti-aliased coverage instead of binary coverage.
    pub anti_alias: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_point_size: 12.0,
            default_dpi: 72.0,
            face_index: 0,
            anti_alias: true,
        }
    }
}

impl LibraryConfig {
    /// Set the default character size.
    pub fn with_size(mut self, point_size: f64, dpi: f64) -> Self {
        self.default_point_size = point_size;
        self.default_dpi = dpi;
        self
    }

    /// Set the face index used for font collections.
    pub fn with_face_index(mut self, face_index: u32) -> Self {
        self.face_index = face_index;
        self
    }

    /// Enable or disable anti-aliased rasterization.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> GlyphRunResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GlyphRunError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> GlyphRunResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check that the default size is usable.
    pub fn validate(&self) -> GlyphRunResult<()> {
        if !(self.default_point_size.is_finite() && self.default_point_size > 0.0) {
            return Err(GlyphRunError::Config(format!(
                "default_point_size must be positive, got {}",
                self.default_point_size
            )));
        }
        if !(self.default_dpi.is_finite() && self.default_dpi > 0.0) {
            return Err(GlyphRunError::Config(format!(
                "default_dpi must be positive, got {}",
                self.default_dpi
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_is_12pt_at_72dpi() {
        let config = LibraryConfig::default();
        assert_eq!(config.default_point_size, 12.0);
        assert_eq!(config.default_dpi, 72.0);
        assert_eq!(config.face_index, 0);
        assert!(config.anti_alias);
    }

    #[test]
    fn test_builder_methods() {
        let config = LibraryConfig::default()
            .with_size(20.0, 80.0)
            .with_face_index(2)
            .with_anti_alias(false);
        assert_eq!(config.default_point_size, 20.0);
        assert_eq!(config.default_dpi, 80.0);
        assert_eq!(config.face_index, 2);
        assert!(!config.anti_alias);
    }

    #[test]
    fn test_from_toml() {
        let config = LibraryConfig::from_toml_str(
            r#"
            default_point_size = 10.5
            anti_alias = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_point_size, 10.5);
        assert_eq!(config.default_dpi, 72.0);
        assert!(!config.anti_alias);
    }

    #[test]
    fn test_from_toml_rejects_bad_size() {
        let err = LibraryConfig::from_toml_str("default_dpi = 0.0").unwrap_err();
        assert!(matches!(err, GlyphRunError::Config(_)));
    }

    #[test]
    fn test_from_toml_rejects_malformed() {
        let err = LibraryConfig::from_toml_str("default_dpi = \"high\"").unwrap_err();
        assert!(matches!(err, GlyphRunError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphrun.toml");
        std::fs::write(&path, "face_index = 1\n").unwrap();
        let config = LibraryConfig::from_file(&path).unwrap();
        assert_eq!(config.face_index, 1);
    }
}
