//! Day-rate extraction for time-based ("temporary works") backend files.
//!
//! Inside each item block, column C carries a day number and column J the
//! rate for that duration. Rates prefer the workbook's cached results (the
//! data-only view calamine provides); a formula with no usable cached value
//! goes through the restricted evaluator instead. Days whose rate cannot be
//! resolved to a positive number are dropped.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::detect::ItemBlock;
use crate::error::{RateBookError, RateBookResult};
use crate::formula::evaluate_formula;
use crate::model::Sheet;
use crate::normalize::normalize_item_name;

/// Day numbers live in column C.
pub const DAY_COL: u32 = 3;
/// Rates live in column J.
pub const RATE_COL: u32 = 10;

/// normalized item name -> (day number -> rate)
pub type DayRateTable = HashMap<String, BTreeMap<u32, f64>>;

/// Cached formula results, keyed by (row, col), 1-indexed.
///
/// This is the data-only view of a workbook: what Excel last calculated,
/// with formulas replaced by their stored results.
#[derive(Debug, Clone, Default)]
pub struct CachedValues {
    values: HashMap<(u32, u32), f64>,
}

impl CachedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: u32, col: u32, value: f64) {
        self.values.insert((row, col), value);
    }

    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        self.values.get(&(row, col)).copied()
    }

    /// Load the cached numeric values of one sheet.
    pub fn load_xlsx(path: &Path, sheet_name: &str) -> RateBookResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| RateBookError::Workbook(format!("Failed to open {:?}: {}", path, e)))?;

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| RateBookError::MissingSheet(format!("{} ({})", sheet_name, e)))?;

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut cached = Self::new();
        for (row, col, data) in range.used_cells() {
            if let Some(value) = numeric(data) {
                cached.insert(
                    start_row + row as u32 + 1,
                    start_col + col as u32 + 1,
                    value,
                );
            }
        }
        Ok(cached)
    }
}

fn numeric(data: &Data) -> Option<f64> {
    match data {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Build the day-rate table for a set of item blocks.
pub fn build_day_rates(
    sheet: &Sheet,
    cached: &CachedValues,
    items: &[ItemBlock],
) -> DayRateTable {
    let mut table = DayRateTable::new();

    for block in items {
        let mut rates = BTreeMap::new();
        for row in block.start_row..=block.end_row {
            let Some(day) = day_number(sheet, row) else {
                continue;
            };
            let Some(rate) = resolve_rate(sheet, cached, row) else {
                continue;
            };
            rates.insert(day, rate);
        }
        table.insert(normalize_item_name(&block.name), rates);
    }

    table
}

/// Convenience wrapper: load the cached view from the same file the sheet
/// came from, then extract.
pub fn build_day_rates_from_file(
    path: &Path,
    sheet: &Sheet,
    items: &[ItemBlock],
) -> RateBookResult<DayRateTable> {
    let cached = CachedValues::load_xlsx(path, sheet.name())?;
    Ok(build_day_rates(sheet, &cached, items))
}

/// Column C parsed as `int(float(..))`; empty, non-numeric, and
/// non-positive cells disqualify the row.
fn day_number(sheet: &Sheet, row: u32) -> Option<u32> {
    let value = sheet.value(row, DAY_COL);
    if value.is_empty() {
        return None;
    }
    let n = value.as_number()?.trunc();
    if n <= 0.0 {
        return None;
    }
    Some(n as u32)
}

/// Cached value first; restricted evaluation of a formula as fallback.
/// Only positive results count.
fn resolve_rate(sheet: &Sheet, cached: &CachedValues, row: u32) -> Option<f64> {
    if let Some(value) = cached.get(row, RATE_COL) {
        if value > 0.0 {
            return Some(value);
        }
    }

    let value = sheet.value(row, RATE_COL);
    if let Some(formula) = value.formula() {
        let evaluated = evaluate_formula(sheet, formula);
        return (evaluated > 0.0).then_some(evaluated);
    }
    value.as_number().filter(|v| *v > 0.0)
}
