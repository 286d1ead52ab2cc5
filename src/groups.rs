//! "Groups" sheet reader.
//!
//! The Groups sheet maps item names to category groups, units of measure,
//! and regional description prefixes. Layout, starting at row 2: column A =
//! item name, column B = group, column C = prefix (read by the separate
//! header-driven scan below), column D = unit.

use std::collections::HashMap;

use crate::model::Sheet;

const ITEM_COL: u32 = 1;
const GROUP_COL: u32 = 2;
const UNIT_COL: u32 = 4;

/// Group membership table with group keys in first-seen order.
///
/// Item lists keep encounter order and are NOT deduplicated: a repeated item
/// row appears twice in its group's list. Backend files in the field may
/// rely on this, so it stays as observed.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    order: Vec<String>,
    map: HashMap<String, Vec<String>>,
}

impl GroupTable {
    pub fn add(&mut self, group: &str, item: String) {
        if !self.map.contains_key(group) {
            self.order.push(group.to_string());
        }
        self.map.entry(group.to_string()).or_default().push(item);
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.map.get(group).map(|v| v.as_slice())
    }

    /// Groups in first-seen order with their member items.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.order
            .iter()
            .map(|g| (g.as_str(), self.map[g].as_slice()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Read the group and unit tables from a Groups sheet.
///
/// Rows with an empty item or group are skipped. Units are optional; when an
/// item name repeats with different units, the last row wins.
pub fn read_groups(sheet: &Sheet) -> (GroupTable, HashMap<String, String>) {
    let mut groups = GroupTable::default();
    let mut units: HashMap<String, String> = HashMap::new();

    for row in 2..=sheet.max_row() {
        let item = sheet.value_text(row, ITEM_COL).trim().to_string();
        let group = sheet.value_text(row, GROUP_COL).trim().to_string();
        if item.is_empty() || group.is_empty() {
            continue;
        }

        let unit = sheet.value_text(row, UNIT_COL).trim().to_string();
        if !unit.is_empty() {
            units.insert(item.clone(), unit);
        }
        groups.add(&group, item);
    }

    (groups, units)
}

/// Read the item -> regional-prefix table.
///
/// The prefix columns are located by header text rather than fixed position:
/// the scan stops at the first row containing a cell reading "item name" or
/// "prefix" (case-insensitive, stripped), takes the two column positions
/// from that row, and maps every following row. Sheets without such a header
/// row yield an empty table; that is not an error.
pub fn read_prefixes(sheet: &Sheet) -> HashMap<String, String> {
    let mut prefixes = HashMap::new();
    let max_row = sheet.max_row();
    let max_col = sheet.max_col();

    let mut header_row = None;
    let mut item_col = None;
    let mut prefix_col = None;

    'rows: for row in 1..=max_row {
        for col in 1..=max_col {
            let text = sheet.value_text(row, col).trim().to_lowercase();
            match text.as_str() {
                "item name" => item_col = Some(col),
                "prefix" => prefix_col = Some(col),
                _ => {}
            }
        }
        if item_col.is_some() || prefix_col.is_some() {
            header_row = Some(row);
            break 'rows;
        }
    }

    let (Some(header_row), Some(item_col), Some(prefix_col)) = (header_row, item_col, prefix_col)
    else {
        return prefixes;
    };

    for row in (header_row + 1)..=max_row {
        let item = sheet.value_text(row, item_col).trim().to_string();
        let prefix = sheet.value_text(row, prefix_col).trim().to_string();
        if !item.is_empty() && !prefix.is_empty() {
            prefixes.insert(item, prefix);
        }
    }

    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn groups_sheet() -> Sheet {
        let mut sheet = Sheet::new("Groups");
        sheet.set_value(1, 1, text("Item Name"));
        sheet.set_value(1, 2, text("Group"));
        sheet.set_value(1, 3, text("Prefix"));
        sheet.set_value(1, 4, text("Unit"));

        sheet.set_value(2, 1, text("Door - 1.2m"));
        sheet.set_value(2, 2, text("Doors"));
        sheet.set_value(2, 3, text("Providing and fixing"));
        sheet.set_value(2, 4, text("Nos"));

        sheet.set_value(3, 1, text("Window - 1.0m"));
        sheet.set_value(3, 2, text("Windows"));
        sheet.set_value(3, 4, text("Nos"));

        sheet.set_value(4, 1, text("Barbed wire"));
        sheet.set_value(4, 2, text("Fencing"));
        sheet.set_value(4, 4, text("Mtrs"));
        sheet
    }

    #[test]
    fn test_read_groups_basic() {
        let (groups, units) = read_groups(&groups_sheet());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get("Doors"), Some(&["Door - 1.2m".to_string()][..]));
        assert_eq!(units["Barbed wire"], "Mtrs");
        let order: Vec<&str> = groups.iter().map(|(g, _)| g).collect();
        assert_eq!(order, vec!["Doors", "Windows", "Fencing"]);
    }

    #[test]
    fn test_rows_missing_item_or_group_are_skipped() {
        let mut sheet = groups_sheet();
        sheet.set_value(5, 1, text("Orphan item"));
        sheet.set_value(6, 2, text("Orphan group"));
        let (groups, units) = read_groups(&sheet);
        assert_eq!(groups.len(), 3);
        assert!(!units.contains_key("Orphan item"));
        assert!(groups.get("Orphan group").is_none());
    }

    #[test]
    fn test_duplicate_item_appends_and_unit_last_wins() {
        let mut sheet = groups_sheet();
        sheet.set_value(5, 1, text("Door - 1.2m"));
        sheet.set_value(5, 2, text("Doors"));
        sheet.set_value(5, 4, text("Each"));

        let (groups, units) = read_groups(&sheet);
        assert_eq!(
            groups.get("Doors"),
            Some(&["Door - 1.2m".to_string(), "Door - 1.2m".to_string()][..])
        );
        assert_eq!(units["Door - 1.2m"], "Each");
    }

    #[test]
    fn test_unit_optional() {
        let mut sheet = Sheet::new("Groups");
        sheet.set_value(2, 1, text("Item X"));
        sheet.set_value(2, 2, text("G"));
        let (groups, units) = read_groups(&sheet);
        assert_eq!(groups.len(), 1);
        assert!(units.is_empty());
    }

    #[test]
    fn test_read_prefixes_header_driven() {
        let prefixes = read_prefixes(&groups_sheet());
        assert_eq!(prefixes.len(), 1);
        assert_eq!(prefixes["Door - 1.2m"], "Providing and fixing");
    }

    #[test]
    fn test_read_prefixes_headers_elsewhere() {
        // Header row found by text, not position: works in any columns.
        let mut sheet = Sheet::new("Groups");
        sheet.set_value(3, 5, text("ITEM NAME"));
        sheet.set_value(3, 7, text("Prefix"));
        sheet.set_value(4, 5, text("Gate"));
        sheet.set_value(4, 7, text("Supplying and erecting"));
        let prefixes = read_prefixes(&sheet);
        assert_eq!(prefixes["Gate"], "Supplying and erecting");
    }

    #[test]
    fn test_read_prefixes_no_header_row() {
        let mut sheet = Sheet::new("Groups");
        sheet.set_value(2, 1, text("Item X"));
        sheet.set_value(2, 2, text("G"));
        assert!(read_prefixes(&sheet).is_empty());
    }

    #[test]
    fn test_read_prefixes_header_row_missing_one_column() {
        // First matching row fixes the header; a lone "item name" with no
        // "prefix" in that row yields an empty table.
        let mut sheet = Sheet::new("Groups");
        sheet.set_value(1, 1, text("Item Name"));
        sheet.set_value(2, 1, text("Prefix"));
        sheet.set_value(3, 1, text("Gate"));
        assert!(read_prefixes(&sheet).is_empty());
    }
}
