//! Loading a resolved backend workbook into its lookup tables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::BackendConfig;
use super::resolver::{resolve_backend, BackendQuery};
use crate::detect::{detect_items, ItemBlock};
use crate::error::{RateBookError, RateBookResult};
use crate::groups::{read_groups, read_prefixes, GroupTable};
use crate::model::Sheet;
use crate::normalize::normalize_item_name;
use crate::xlsx::read_workbook;

/// The item catalog sheet every backend must carry.
pub const MASTER_SHEET: &str = "Master Datas";
/// The metadata sheet every backend must carry.
pub const GROUPS_SHEET: &str = "Groups";

/// A backend workbook parsed into everything composition needs.
#[derive(Debug, Clone)]
pub struct LoadedBackend {
    pub path: PathBuf,
    /// The "Master Datas" sheet, formulas preserved.
    pub master: Sheet,
    /// Detected item blocks in sheet order.
    pub items: Vec<ItemBlock>,
    /// item name -> block; a duplicated heading keeps its last block.
    pub item_index: HashMap<String, ItemBlock>,
    pub groups: GroupTable,
    pub units: HashMap<String, String>,
    pub prefixes: HashMap<String, String>,
}

impl LoadedBackend {
    /// Look up an item by name: exact first, then whitespace-normalized,
    /// since names arriving from a UI may have had their whitespace
    /// collapsed differently than the sheet's.
    pub fn find_item(&self, name: &str) -> Option<&ItemBlock> {
        if let Some(block) = self.item_index.get(name) {
            return Some(block);
        }
        let wanted = normalize_item_name(name);
        self.item_index
            .iter()
            .find(|(key, _)| normalize_item_name(key) == wanted)
            .map(|(_, block)| block)
    }
}

/// Resolve a backend through the storage tiers and load it.
pub fn load_backend(config: &BackendConfig, query: &BackendQuery) -> RateBookResult<LoadedBackend> {
    let path = resolve_backend(config, query)?;
    load_backend_file(&path)
}

/// Load a backend workbook from a known path.
///
/// Fails fast with `MissingSheet` when the file lacks "Master Datas" or
/// "Groups"; that is fatal for the whole job, like an unresolvable backend.
pub fn load_backend_file(path: &Path) -> RateBookResult<LoadedBackend> {
    let workbook = read_workbook(path)?;

    let groups_sheet = workbook
        .sheet(GROUPS_SHEET)
        .ok_or_else(|| RateBookError::MissingSheet(GROUPS_SHEET.to_string()))?;
    let (groups, units) = read_groups(groups_sheet);
    let prefixes = read_prefixes(groups_sheet);

    let master = workbook
        .into_sheet(MASTER_SHEET)
        .ok_or_else(|| RateBookError::MissingSheet(MASTER_SHEET.to_string()))?;

    let items = detect_items(&master);
    let mut item_index = HashMap::new();
    for block in &items {
        item_index.insert(block.name.clone(), block.clone());
    }

    debug!(
        items = items.len(),
        groups = groups.len(),
        path = ?path,
        "loaded backend workbook"
    );

    Ok(LoadedBackend {
        path: path.to_path_buf(),
        master,
        items,
        item_index,
        groups,
        units,
        prefixes,
    })
}
