//! Document composition: selected items into a growing output sheet.
//!
//! One composed sheet per document; summary rows (totals, taxes) are the
//! calling job's responsibility after composition.

use tracing::warn;

use crate::backend::LoadedBackend;
use crate::copier::{copy_block, CopyOutcome};
use crate::detect::HEADING_SCAN_COLS;
use crate::model::Sheet;

/// Blocks are copied over the fixed business-data window, columns A..J.
pub const COPY_COL_START: u32 = 1;
pub const COPY_COL_END: u32 = HEADING_SCAN_COLS;

/// The result of composing one output sheet.
#[derive(Debug)]
pub struct ComposedDocument {
    pub sheet: Sheet,
    /// Requested names with no matching block, in request order.
    pub missing: Vec<String>,
    pub cells_copied: usize,
    pub warnings: Vec<String>,
}

/// Copy each selected item's block, in request order, into a fresh "Output"
/// sheet. A name with no matching block is skipped and reported, never
/// fatal: the document is produced from whatever was found.
pub fn compose_output(backend: &LoadedBackend, item_names: &[String]) -> ComposedDocument {
    let mut sheet = Sheet::new("Output");
    let mut missing = Vec::new();
    let mut cells_copied = 0;
    let mut warnings = Vec::new();
    let mut next_row = 1u32;

    for name in item_names {
        match append_item(&mut sheet, backend, name, next_row) {
            Some((row_after, outcome)) => {
                next_row = row_after;
                cells_copied += outcome.cells_copied;
                warnings.extend(outcome.warnings);
            }
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() {
        let sample: Vec<&str> = missing.iter().take(5).map(|s| s.as_str()).collect();
        warn!(
            count = missing.len(),
            ?sample,
            "selected items not found in backend; skipped"
        );
    }

    ComposedDocument {
        sheet,
        missing,
        cells_copied,
        warnings,
    }
}

/// Append one item's block to `dest` at `at_row`. Returns the first row
/// after the appended block and the copy outcome, or `None` when the item
/// has no block in the backend.
pub fn append_item(
    dest: &mut Sheet,
    backend: &LoadedBackend,
    item_name: &str,
    at_row: u32,
) -> Option<(u32, CopyOutcome)> {
    let block = backend.find_item(item_name)?;
    let outcome = copy_block(
        &backend.master,
        dest,
        block.start_row,
        block.end_row,
        COPY_COL_START,
        COPY_COL_END,
        at_row,
        1,
    );
    Some((at_row + block.row_count(), outcome))
}
