//! Backend storage configuration and the manifest of registered backends.
//!
//! All location state is carried explicitly in [`BackendConfig`]; the
//! engine reads no ambient settings. The manifest is a small YAML registry
//! next to the backend files describing the storage tiers the resolver
//! walks: registered backends by id, per-user preferences, module defaults,
//! and legacy single-file-per-category records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RateBookError, RateBookResult};

/// Where backend workbooks live.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Directory holding registered backend workbooks and the manifest.
    pub base_dir: PathBuf,
    /// Manifest location override; defaults to `<base_dir>/backends.yaml`.
    pub manifest_path: Option<PathBuf>,
    /// Directory of bundled fallback files, one `<category>.xlsx` each.
    pub static_dir: Option<PathBuf>,
}

impl BackendConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            manifest_path: None,
            static_dir: None,
        }
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_path
            .clone()
            .unwrap_or_else(|| self.base_dir.join("backends.yaml"))
    }

    /// Load the manifest. A missing manifest file is an empty manifest, not
    /// an error: the static-file tier can still resolve.
    pub fn load_manifest(&self) -> RateBookResult<Manifest> {
        let path = self.manifest_path();
        if !path.is_file() {
            return Ok(Manifest::default());
        }
        Manifest::from_file(&path)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub backends: Vec<BackendRecord>,
    #[serde(default)]
    pub user_preferences: Vec<UserPreference>,
    #[serde(default)]
    pub defaults: Vec<ModuleDefault>,
    #[serde(default)]
    pub legacy: Vec<LegacyRecord>,
}

/// A registered backend workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendRecord {
    pub id: u32,
    pub category: String,
    #[serde(default)]
    pub module: Option<String>,
    /// File name relative to the config's base directory.
    pub file: String,
}

/// A user's saved choice of backend for a category.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPreference {
    pub user: String,
    pub category: String,
    pub backend_id: u32,
}

/// The default backend for a module/category pair.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDefault {
    pub module: String,
    pub category: String,
    pub backend_id: u32,
}

/// Pre-registry record: one file per category.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRecord {
    pub category: String,
    pub file: String,
}

impl Manifest {
    pub fn from_file(path: &Path) -> RateBookResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| RateBookError::Manifest(format!("{:?}: {}", path, e)))
    }

    pub fn backend_by_id(&self, id: u32) -> Option<&BackendRecord> {
        self.backends.iter().find(|b| b.id == id)
    }

    pub fn preference(&self, user: &str, category: &str) -> Option<u32> {
        self.user_preferences
            .iter()
            .find(|p| p.user == user && p.category == category)
            .map(|p| p.backend_id)
    }

    pub fn module_default(&self, module: &str, category: &str) -> Option<u32> {
        self.defaults
            .iter()
            .find(|d| d.module == module && d.category == category)
            .map(|d| d.backend_id)
    }

    pub fn legacy_file(&self, category: &str) -> Option<&str> {
        self.legacy
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.file.as_str())
    }
}
