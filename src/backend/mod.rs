//! Backend workbook location and loading.
//!
//! A "backend" is the admin-authored rate book for one category/module
//! combination. Several storage tiers can supply it; the resolver walks
//! them in a fixed order and the loader turns the winning file into the
//! lookup tables the composition step works from.

mod config;
mod loader;
mod resolver;

pub use config::{BackendConfig, BackendRecord, LegacyRecord, Manifest, ModuleDefault, UserPreference};
pub use loader::{load_backend, load_backend_file, LoadedBackend, GROUPS_SHEET, MASTER_SHEET};
pub use resolver::{resolve_backend, BackendQuery};
