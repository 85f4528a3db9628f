//! Ingestion settings.
//!
//! Settings are a JSON file with every field optional. Environment variables
//! override the file: `DATASET_IO_COLOR` (`auto`/`always`/`never`) and
//! `NO_COLOR` (any value disables color).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::ManifestCheck;
use crate::util::{ColorMode, Error, Palette, Result};

/// Environment variable selecting the color mode.
pub const COLOR_ENV: &str = "DATASET_IO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Terminal color mode
    pub color: ColorMode,
    /// Policy for manifest names without `.json`
    pub manifest_check: ManifestCheck,
    /// Extension appended to catalog entries to form mesh paths
    pub mesh_extension: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            manifest_check: ManifestCheck::Error,
            mesh_extension: "obj".to_string(),
        }
    }
}

impl IngestConfig {
    /// Default settings file: `<config dir>/dataset-io/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("dataset-io");
            p.push("config.json");
            p
        })
    }

    /// Load settings from `path`. Errors propagate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::open_failed(path, e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.with_env())
    }

    /// Load the default settings file when it exists, else defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default().with_env()),
        }
    }

    /// Apply environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(COLOR_ENV).ok().as_deref(),
            std::env::var_os("NO_COLOR").is_some(),
        )
    }

    fn with_overrides(mut self, color: Option<&str>, no_color: bool) -> Self {
        if let Some(mode) = color.and_then(ColorMode::parse) {
            self.color = mode;
        }
        if no_color {
            self.color = ColorMode::Never;
        }
        self
    }

    /// Resolve the color mode once into a palette.
    pub fn palette(&self) -> Palette {
        self.color.resolve()
    }
}
