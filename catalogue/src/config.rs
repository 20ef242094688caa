//! Settings for catalogue file import and export.
//!
//! Stored as JSON, by default at `~/.catalogue/config.json`.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec::ConflictPolicy;
use crate::error::{CatalogueError, CatalogueResult};

/// File naming and overwrite behaviour for catalogue files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Extension of both record files, without the dot
    pub object_extension: String,
    /// Appended to the catalogue name to form the relationship file stem
    pub relationship_suffix: String,
    /// What export does when a destination file already exists
    pub on_conflict: ConflictPolicy,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            object_extension: "dat".to_string(),
            relationship_suffix: "_relationships".to_string(),
            on_conflict: ConflictPolicy::default(),
        }
    }
}

impl CatalogueConfig {
    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> CatalogueResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> CatalogueResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Default config location (`$HOME/.catalogue/config.json`).
    pub fn default_path() -> CatalogueResult<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            CatalogueError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME not set",
            ))
        })?;
        Ok(PathBuf::from(home).join(".catalogue").join("config.json"))
    }

    /// Load `path`, falling back to defaults if the file does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> CatalogueResult<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}
