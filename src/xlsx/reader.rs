//! Style-aware workbook reading: umya-spreadsheet into the model.
//!
//! Formulas are preserved, not evaluated; cached formula results are read
//! separately through the data-only view (see `dayrate::CachedValues`).

use std::path::Path;

use umya_spreadsheet::{
    Alignment, Border, Cell as XlsxCell, Fill, Font, PatternValues, Style, Worksheet,
};

use crate::error::{RateBookError, RateBookResult};
use crate::model::{
    parse_range, AlignStyle, BorderSet, BorderSide, CellStyle, CellValue, Color, FillPattern,
    FillStyle, FontStyle, MergedRegion, ProtectionStyle, Sheet,
};

/// A fully loaded workbook in model form.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn into_sheet(self, name: &str) -> Option<Sheet> {
        self.sheets.into_iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }
}

/// Read an .xlsx file into the model, carrying values, formulas, styles,
/// merged ranges, and explicit row/column dimensions.
pub fn read_workbook(path: &Path) -> RateBookResult<Workbook> {
    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| RateBookError::Workbook(format!("Failed to read {:?}: {}", path, e)))?;

    let sheets = book
        .get_sheet_collection()
        .iter()
        .map(convert_sheet)
        .collect();

    Ok(Workbook { sheets })
}

fn convert_sheet(ws: &Worksheet) -> Sheet {
    let mut sheet = Sheet::new(ws.get_name());
    let max_row = ws.get_highest_row();
    let max_col = ws.get_highest_column();

    for row in 1..=max_row {
        for col in 1..=max_col {
            let Some(cell) = ws.get_cell((col, row)) else {
                continue;
            };
            let value = convert_value(cell);
            let style = convert_style(cell.get_style());
            if value.is_empty() && style.is_default() {
                continue;
            }
            let target = sheet.cell_mut(row, col);
            target.value = value;
            target.style = style;
        }
    }

    for merge in ws.get_merge_cells() {
        let range = merge.get_range();
        if let Some((min_row, min_col, max_row, max_col)) = parse_range(&range) {
            sheet
                .merges
                .add(MergedRegion::new(min_row, min_col, max_row, max_col));
        }
    }

    for col in 1..=max_col {
        if let Some(dim) = ws.get_column_dimension_by_number(&col) {
            let width = *dim.get_width();
            if width > 0.0 {
                sheet.set_col_width(col, width);
            }
        }
    }
    for row in 1..=max_row {
        if let Some(dim) = ws.get_row_dimension(&row) {
            let height = *dim.get_height();
            if height > 0.0 {
                sheet.set_row_height(row, height);
            }
        }
    }

    sheet
}

/// Formula cells keep their text (normalized to a leading `=`); plain cells
/// are typed by parsing the stored string form.
fn convert_value(cell: &XlsxCell) -> CellValue {
    let formula = cell.get_formula();
    if !formula.is_empty() {
        return CellValue::Formula(format!("={}", formula.trim_start_matches('=')));
    }

    let text = cell.get_value();
    if text.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(number) = text.trim().parse::<f64>() {
        return CellValue::Number(number);
    }
    match text.as_ref() {
        "TRUE" => CellValue::Bool(true),
        "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(text.to_string()),
    }
}

fn convert_style(style: &Style) -> CellStyle {
    CellStyle {
        font: style.get_font().map(convert_font),
        fill: style.get_fill().and_then(convert_fill),
        borders: style
            .get_borders()
            .map(|borders| BorderSet {
                top: convert_border_side(borders.get_top()),
                bottom: convert_border_side(borders.get_bottom()),
                left: convert_border_side(borders.get_left()),
                right: convert_border_side(borders.get_right()),
            })
            .filter(|b| !b.is_empty()),
        alignment: style.get_alignment().map(convert_alignment),
        number_format: style
            .get_number_format()
            .map(|nf| nf.get_format_code().to_string()),
        protection: style.get_protection().map(|p| ProtectionStyle {
            locked: *p.get_locked(),
            hidden: *p.clone().get_hidden(),
        }),
    }
}

fn convert_font(font: &Font) -> FontStyle {
    let name = font.get_name();
    let size = *font.get_size();
    let underline = font.get_underline();
    FontStyle {
        name: (!name.is_empty()).then(|| name.to_string()),
        size: (size > 0.0).then_some(size),
        bold: *font.get_bold(),
        italic: *font.get_italic(),
        underline: !underline.is_empty() && underline != "none",
        color: convert_color(font.get_color()),
    }
}

fn convert_fill(fill: &Fill) -> Option<FillStyle> {
    let pattern_fill = fill.get_pattern_fill()?;
    let pattern = match pattern_fill.get_pattern_type() {
        PatternValues::Solid => FillPattern::Solid,
        PatternValues::None => FillPattern::None,
        _ => FillPattern::Patterned,
    };
    Some(FillStyle {
        pattern,
        foreground: pattern_fill.get_foreground_color().and_then(convert_color),
    })
}

/// Map whichever of the three encodings the color carries. A literal ARGB
/// wins; otherwise theme, then indexed. An unset color maps to `None`.
fn convert_color(color: &umya_spreadsheet::Color) -> Option<Color> {
    let argb = color.get_argb();
    if !argb.is_empty() {
        return Some(Color::rgb(argb));
    }
    let theme = *color.get_theme_index();
    if theme != 0 {
        return Some(Color::Theme(theme));
    }
    let indexed = *color.get_indexed();
    if indexed != 0 {
        return Some(Color::Indexed(indexed));
    }
    None
}

fn convert_border_side(border: &Border) -> Option<BorderSide> {
    let style = border.get_border_style();
    if style.is_empty() || style == "none" {
        return None;
    }
    Some(BorderSide {
        style: style.to_string(),
        color: convert_color(border.get_color()),
    })
}

fn convert_alignment(alignment: &Alignment) -> AlignStyle {
    let horizontal = format!("{:?}", alignment.get_horizontal()).to_lowercase();
    let vertical = format!("{:?}", alignment.get_vertical()).to_lowercase();
    AlignStyle {
        horizontal: (horizontal != "general").then_some(horizontal),
        vertical: (vertical != "none").then_some(vertical),
        wrap_text: *alignment.get_wrap_text(),
    }
}
