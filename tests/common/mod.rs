//! Shared on-disk fixtures for the integration suites.
//!
//! Fixtures are written with umya-spreadsheet so they carry real fills,
//! fonts, merges, and dimensions, then read back through the engine.

#![allow(dead_code)] // each suite uses its own subset of the fixtures

use std::path::Path;

use umya_spreadsheet::Spreadsheet;

/// Mark a cell as an item heading: solid yellow fill, red font.
pub fn make_heading(book: &mut Spreadsheet, sheet: &str, coordinate: &str, label: &str) {
    let worksheet = book.get_sheet_by_name_mut(sheet).unwrap();
    worksheet.get_cell_mut(coordinate).set_value_string(label);
    let style = worksheet.get_style_mut(coordinate);
    style.set_background_color("FFFFFF00");
    style.get_font_mut().get_color_mut().set_argb("FFFF0000");
}

fn set_text(book: &mut Spreadsheet, sheet: &str, coordinate: &str, value: &str) {
    book.get_sheet_by_name_mut(sheet)
        .unwrap()
        .get_cell_mut(coordinate)
        .set_value_string(value);
}

fn set_number(book: &mut Spreadsheet, sheet: &str, coordinate: &str, value: f64) {
    book.get_sheet_by_name_mut(sheet)
        .unwrap()
        .get_cell_mut(coordinate)
        .set_value_number(value);
}

fn set_formula(book: &mut Spreadsheet, sheet: &str, coordinate: &str, formula: &str) {
    book.get_sheet_by_name_mut(sheet)
        .unwrap()
        .get_cell_mut(coordinate)
        .set_formula(formula);
}

/// A two-sheet backend book with empty "Master Datas" and "Groups".
pub fn empty_backend_book() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_by_name_mut("Sheet1")
        .unwrap()
        .set_name("Master Datas");
    let _ = book.new_sheet("Groups");
    book
}

/// The standard catalog fixture:
///
/// Master Datas
///   rows 10-15: "Door - 1.2m" (heading at A10, merge A11:B11,
///               description at D12, rate formula =G14*I14 at J14)
///   rows 16-18: "Window - 1.0m" (heading at A16, description at D17)
/// Groups
///   "Door - 1.2m" / Doors / "Providing and fixing" / Nos
///   "Window - 1.0m" / Windows / - / Nos
pub fn write_backend_fixture(path: &Path) {
    let mut book = empty_backend_book();

    make_heading(&mut book, "Master Datas", "A10", "Door - 1.2m");
    set_text(&mut book, "Master Datas", "A11", "Specification");
    set_text(&mut book, "Master Datas", "D12", "Flush door");
    set_number(&mut book, "Master Datas", "G14", 300.0);
    set_number(&mut book, "Master Datas", "I14", 8.0);
    set_formula(&mut book, "Master Datas", "J14", "=G14*I14");
    book.get_sheet_by_name_mut("Master Datas")
        .unwrap()
        .add_merge_cells("A11:B11");

    make_heading(&mut book, "Master Datas", "A16", "Window - 1.0m");
    set_text(&mut book, "Master Datas", "D17", "Glazed window");
    set_text(&mut book, "Master Datas", "D18", "note");

    set_text(&mut book, "Groups", "A1", "Item Name");
    set_text(&mut book, "Groups", "B1", "Group");
    set_text(&mut book, "Groups", "C1", "Prefix");
    set_text(&mut book, "Groups", "D1", "Unit");
    set_text(&mut book, "Groups", "A2", "Door - 1.2m");
    set_text(&mut book, "Groups", "B2", "Doors");
    set_text(&mut book, "Groups", "C2", "Providing and fixing");
    set_text(&mut book, "Groups", "D2", "Nos");
    set_text(&mut book, "Groups", "A3", "Window - 1.0m");
    set_text(&mut book, "Groups", "B3", "Windows");
    set_text(&mut book, "Groups", "D3", "Nos");

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// A temporary-works fixture: one item whose rows carry day numbers in
/// column C and rates in column J (literal, chained formula, ROUND formula,
/// and one unusable row).
pub fn write_day_rate_fixture(path: &Path) {
    let mut book = empty_backend_book();

    make_heading(&mut book, "Master Datas", "A2", "Steel Props");
    set_number(&mut book, "Master Datas", "C3", 1.0);
    set_number(&mut book, "Master Datas", "J3", 150.0);
    set_number(&mut book, "Master Datas", "C4", 7.0);
    set_formula(&mut book, "Master Datas", "J4", "=J3*7");
    set_number(&mut book, "Master Datas", "G5", 45.5);
    set_number(&mut book, "Master Datas", "C5", 30.0);
    set_formula(&mut book, "Master Datas", "J5", "=ROUND(G5*30, 2)");
    set_text(&mut book, "Master Datas", "C6", "n/a");
    set_number(&mut book, "Master Datas", "J6", 999.0);

    set_text(&mut book, "Groups", "A2", "Steel Props");
    set_text(&mut book, "Groups", "B2", "Temporary");
    set_text(&mut book, "Groups", "D2", "Day");

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}
