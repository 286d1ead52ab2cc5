//! Item-block detection.
//!
//! A backend sheet is a stack of item blocks: a heading row (yellow fill,
//! red text) followed by the rows that make up that item's template. Blocks
//! run until the next heading row or the end of the sheet.

use tracing::debug;

use crate::classify::is_heading_cell;
use crate::model::Sheet;

/// Headings only ever appear in columns A..J; the business data never
/// extends past column J, and neither does the copy window.
pub const HEADING_SCAN_COLS: u32 = 10;

/// One catalog entry: a contiguous, inclusive row range in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock {
    pub name: String,
    pub start_row: u32,
    pub end_row: u32,
}

impl ItemBlock {
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }
}

/// Scan a sheet top to bottom and partition it into item blocks.
///
/// Pure function of the sheet content: re-running it over the same sheet
/// yields the same blocks. A sheet with no heading rows yields an empty
/// vector.
pub fn detect_items(sheet: &Sheet) -> Vec<ItemBlock> {
    let max_row = sheet.max_row();
    let mut blocks = Vec::new();
    let mut row = 1u32;

    while row <= max_row {
        let Some(name) = heading_label(sheet, row) else {
            row += 1;
            continue;
        };

        // Block runs until the row before the next heading, or sheet end.
        let mut end_row = max_row;
        let mut next = row + 1;
        while next <= max_row {
            if heading_label(sheet, next).is_some() {
                end_row = next - 1;
                break;
            }
            next += 1;
        }

        debug!(item = %name, start_row = row, end_row, "detected item block");
        blocks.push(ItemBlock {
            name,
            start_row: row,
            end_row,
        });
        row = end_row + 1;
    }

    blocks
}

/// The heading label of a row, if any cell in the scan window classifies as
/// a heading. Leftmost match wins.
fn heading_label(sheet: &Sheet, row: u32) -> Option<String> {
    for col in 1..=HEADING_SCAN_COLS {
        if let Some(cell) = sheet.cell(row, col) {
            if is_heading_cell(cell) {
                return Some(cell.value.as_text().trim().to_string());
            }
        }
    }
    None
}
