//! Backend resolution chain.
//!
//! Tiers, in order: explicit backend id, the user's saved preference, the
//! module/category default, the legacy per-category record, and finally a
//! bundled static file. The first tier that lands on an existing readable
//! file wins; exhausting all of them is a `BackendNotFound`.

use std::path::PathBuf;

use tracing::debug;

use super::config::{BackendConfig, Manifest};
use crate::error::{RateBookError, RateBookResult};

/// Who is asking for which rate book.
#[derive(Debug, Clone, Default)]
pub struct BackendQuery {
    pub category: String,
    pub module_code: Option<String>,
    pub backend_id: Option<u32>,
    pub user: Option<String>,
}

impl BackendQuery {
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }
}

/// Walk the storage tiers and return the first existing backend file.
pub fn resolve_backend(config: &BackendConfig, query: &BackendQuery) -> RateBookResult<PathBuf> {
    let manifest = config.load_manifest()?;

    if let Some(id) = query.backend_id {
        if let Some(path) = registered_file(config, &manifest, id) {
            debug!(id, ?path, "resolved backend by explicit id");
            return Ok(path);
        }
    }

    if let Some(user) = &query.user {
        if let Some(id) = manifest.preference(user, &query.category) {
            if let Some(path) = registered_file(config, &manifest, id) {
                debug!(user = %user, id, ?path, "resolved backend from user preference");
                return Ok(path);
            }
        }
    }

    if let Some(module) = &query.module_code {
        if let Some(id) = manifest.module_default(module, &query.category) {
            if let Some(path) = registered_file(config, &manifest, id) {
                debug!(module = %module, id, ?path, "resolved backend from module default");
                return Ok(path);
            }
        }
    }

    if let Some(file) = manifest.legacy_file(&query.category) {
        if let Some(path) = existing(config.base_dir.join(file)) {
            debug!(?path, "resolved backend from legacy record");
            return Ok(path);
        }
    }

    if let Some(static_dir) = &config.static_dir {
        if let Some(path) = existing(static_dir.join(format!("{}.xlsx", slug(&query.category)))) {
            debug!(?path, "resolved backend from bundled static file");
            return Ok(path);
        }
    }

    Err(RateBookError::BackendNotFound(format!(
        "category '{}', module {:?}, backend id {:?}",
        query.category, query.module_code, query.backend_id
    )))
}

fn registered_file(config: &BackendConfig, manifest: &Manifest, id: u32) -> Option<PathBuf> {
    manifest
        .backend_by_id(id)
        .and_then(|record| existing(config.base_dir.join(&record.file)))
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// File-name form of a category ("Temporary Works" -> "temporary_works").
fn slug(category: &str) -> String {
    category
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
