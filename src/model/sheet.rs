//! The sheet grid: sparse cells keyed by (row, col), merged regions, and
//! explicit row/column dimensions.

use std::collections::BTreeMap;

use super::cell::{Cell, CellValue};
use super::style::CellStyle;

/// A merged cell range, inclusive on both ends, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl MergedRegion {
    pub fn new(min_row: u32, min_col: u32, max_row: u32, max_col: u32) -> Self {
        MergedRegion {
            min_row: min_row.min(max_row),
            min_col: min_col.min(max_col),
            max_row: min_row.max(max_row),
            max_col: min_col.max(max_col),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    pub fn top_left(&self) -> (u32, u32) {
        (self.min_row, self.min_col)
    }

    /// Whole containment inside a copy window.
    pub fn within(&self, min_row: u32, max_row: u32, min_col: u32, max_col: u32) -> bool {
        self.min_row >= min_row
            && self.max_row <= max_row
            && self.min_col >= min_col
            && self.max_col <= max_col
    }

    /// The same region shifted by a (possibly negative) row/col offset.
    /// Returns `None` if the shift would leave the sheet.
    pub fn translate(&self, row_offset: i64, col_offset: i64) -> Option<MergedRegion> {
        let shift = |v: u32, d: i64| -> Option<u32> {
            let shifted = v as i64 + d;
            if shifted >= 1 {
                Some(shifted as u32)
            } else {
                None
            }
        };
        Some(MergedRegion {
            min_row: shift(self.min_row, row_offset)?,
            min_col: shift(self.min_col, col_offset)?,
            max_row: shift(self.max_row, row_offset)?,
            max_col: shift(self.max_col, col_offset)?,
        })
    }
}

/// The set of merged regions on one sheet.
#[derive(Debug, Clone, Default)]
pub struct MergeSet {
    regions: Vec<MergedRegion>,
}

impl MergeSet {
    pub fn add(&mut self, region: MergedRegion) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedRegion> + '_ {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region covering a coordinate, if any. Regions never overlap in a
    /// well-formed file; the first hit wins.
    pub fn find_containing(&self, row: u32, col: u32) -> Option<&MergedRegion> {
        self.regions.iter().find(|r| r.contains(row, col))
    }

    /// All regions wholly contained in a window.
    pub fn contained_in(
        &self,
        min_row: u32,
        max_row: u32,
        min_col: u32,
        max_col: u32,
    ) -> Vec<MergedRegion> {
        self.regions
            .iter()
            .filter(|r| r.within(min_row, max_row, min_col, max_col))
            .copied()
            .collect()
    }
}

/// One worksheet: a sparse cell grid plus merges and explicit dimensions.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    pub merges: MergeSet,
    col_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest row holding a cell, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map(|(r, _)| *r).unwrap_or(0)
    }

    /// Highest column holding a cell, or 0 for an empty sheet.
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|(_, c)| *c).max().unwrap_or(0)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Mutable access, creating an empty cell on first touch.
    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        debug_assert!(row >= 1 && col >= 1);
        self.cells.entry((row, col)).or_default()
    }

    pub fn value(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&(row, col))
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Stringified value, empty string for absent cells.
    pub fn value_text(&self, row: u32, col: u32) -> String {
        self.cells
            .get(&(row, col))
            .map(|c| c.value.as_text())
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        self.cell_mut(row, col).value = value;
    }

    pub fn set_style(&mut self, row: u32, col: u32, style: CellStyle) {
        self.cell_mut(row, col).style = style;
    }

    pub fn col_width(&self, col: u32) -> Option<f64> {
        self.col_widths.get(&col).copied()
    }

    pub fn set_col_width(&mut self, col: u32, width: f64) {
        self.col_widths.insert(col, width);
    }

    pub fn col_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.col_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    /// All populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), &Cell)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, v))
    }
}
