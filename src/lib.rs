//! Ratebook - Schedule-of-Rates workbook engine
//!
//! This library extracts item catalog blocks from admin-authored SOR rate
//! books (.xlsx) and composes estimate output workbooks from them.
//!
//! # Features
//!
//! - Item-block detection by the yellow-fill/red-font heading convention
//! - Group, unit, and regional-prefix lookup tables from the Groups sheet
//! - Styled block copy with relative formula translation and merge handling
//! - Day-rate extraction with a sandboxed arithmetic evaluator
//! - Backend resolution across registered, preferred, default, legacy, and
//!   bundled storage tiers
//!
//! # Example
//!
//! ```no_run
//! use ratebook::backend::load_backend_file;
//! use ratebook::compose::compose_output;
//! use ratebook::xlsx::write_workbook;
//! use std::path::Path;
//!
//! let backend = load_backend_file(Path::new("buildings.xlsx"))?;
//! println!("Items: {}", backend.items.len());
//!
//! let selected = vec!["Door - 1.2m".to_string()];
//! let document = compose_output(&backend, &selected);
//! write_workbook(&[document.sheet], Path::new("estimate.xlsx"))?;
//! # Ok::<(), ratebook::error::RateBookError>(())
//! ```

pub mod backend;
pub mod classify;
pub mod cli;
pub mod compose;
pub mod copier;
pub mod dayrate;
pub mod detect;
pub mod error;
pub mod formula;
pub mod groups;
pub mod model;
pub mod normalize;
pub mod xlsx;

// Re-export commonly used types
pub use backend::{BackendConfig, BackendQuery, LoadedBackend};
pub use copier::{copy_block, CopyOutcome};
pub use detect::{detect_items, ItemBlock};
pub use error::{RateBookError, RateBookResult};
pub use model::{Cell, CellStyle, CellValue, Sheet};
