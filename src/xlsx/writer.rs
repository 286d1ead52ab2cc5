//! Workbook writing: the model out to .xlsx via rust_xlsxwriter.
//!
//! Theme and indexed colors are lowered to literal RGB through fixed
//! palettes. Style fidelity is best-effort; values and formulas are exact.

use std::path::Path;

use rust_xlsxwriter::{
    Color as XlsxColor, Format, FormatAlign, FormatBorder, FormatUnderline, Formula, Workbook,
};

use crate::error::{RateBookError, RateBookResult};
use crate::model::{CellStyle, CellValue, Color, Sheet};

/// Office default theme palette, by theme index.
const THEME_PALETTE: [u32; 10] = [
    0xFFFFFF, 0x000000, 0xE7E6E6, 0x44546A, 0x4472C4, 0xED7D31, 0xA5A5A5, 0xFFC000, 0x5B9BD5,
    0x70AD47,
];

/// Classic indexed palette, first 16 slots (the later slots repeat).
const INDEXED_PALETTE: [u32; 16] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0x000000,
    0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF,
];

/// Write the given sheets, in order, to an .xlsx file.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> RateBookResult<()> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        write_sheet(&mut workbook, sheet)?;
    }

    workbook
        .save(path)
        .map_err(|e| RateBookError::Export(format!("Failed to save {:?}: {}", path, e)))?;
    Ok(())
}

fn write_sheet(workbook: &mut Workbook, sheet: &Sheet) -> RateBookResult<()> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.name())
        .map_err(|e| RateBookError::Export(format!("Failed to set sheet name: {}", e)))?;

    for (col, width) in sheet.col_widths() {
        worksheet
            .set_column_width((col - 1) as u16, width)
            .map_err(|e| RateBookError::Export(format!("Failed to set column width: {}", e)))?;
    }
    for (row, height) in sheet.row_heights() {
        worksheet
            .set_row_height(row - 1, height)
            .map_err(|e| RateBookError::Export(format!("Failed to set row height: {}", e)))?;
    }

    // Merges go in first: the anchor value is written over the blank merge
    // afterwards, which is the writer's supported order of operations.
    for merge in sheet.merges.iter() {
        let format = sheet
            .cell(merge.min_row, merge.min_col)
            .map(|c| to_format(&c.style))
            .unwrap_or_default();
        worksheet
            .merge_range(
                merge.min_row - 1,
                (merge.min_col - 1) as u16,
                merge.max_row - 1,
                (merge.max_col - 1) as u16,
                "",
                &format,
            )
            .map_err(|e| RateBookError::Export(format!("Failed to merge cells: {}", e)))?;
    }

    for ((row, col), cell) in sheet.cells() {
        // cells shadowed by a merge belong to the anchor
        if let Some(merge) = sheet.merges.find_containing(row, col) {
            if merge.top_left() != (row, col) {
                continue;
            }
        }

        let format = to_format(&cell.style);
        let r = row - 1;
        let c = (col - 1) as u16;
        let written = match &cell.value {
            CellValue::Empty => {
                if cell.style.is_default() || sheet.merges.find_containing(row, col).is_some() {
                    continue;
                }
                worksheet.write_blank(r, c, &format)
            }
            CellValue::Number(n) => worksheet.write_number_with_format(r, c, *n, &format),
            CellValue::Bool(b) => worksheet.write_boolean_with_format(r, c, *b, &format),
            CellValue::Text(s) => worksheet.write_string_with_format(r, c, s, &format),
            CellValue::Formula(f) => {
                worksheet.write_formula_with_format(r, c, Formula::new(f), &format)
            }
        };
        written.map_err(|e| RateBookError::Export(format!("Failed to write cell: {}", e)))?;
    }

    Ok(())
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if let Some(font) = &style.font {
        if let Some(name) = &font.name {
            format = format.set_font_name(name);
        }
        if let Some(size) = font.size {
            format = format.set_font_size(size);
        }
        if font.bold {
            format = format.set_bold();
        }
        if font.italic {
            format = format.set_italic();
        }
        if font.underline {
            format = format.set_underline(FormatUnderline::Single);
        }
        if let Some(color) = &font.color {
            format = format.set_font_color(lower_color(color));
        }
    }

    if let Some(fill) = &style.fill {
        if let Some(color) = &fill.foreground {
            format = format.set_background_color(lower_color(color));
        }
    }

    if let Some(borders) = &style.borders {
        if let Some(side) = &borders.top {
            format = format.set_border_top(border_kind(&side.style));
            if let Some(color) = &side.color {
                format = format.set_border_top_color(lower_color(color));
            }
        }
        if let Some(side) = &borders.bottom {
            format = format.set_border_bottom(border_kind(&side.style));
            if let Some(color) = &side.color {
                format = format.set_border_bottom_color(lower_color(color));
            }
        }
        if let Some(side) = &borders.left {
            format = format.set_border_left(border_kind(&side.style));
            if let Some(color) = &side.color {
                format = format.set_border_left_color(lower_color(color));
            }
        }
        if let Some(side) = &borders.right {
            format = format.set_border_right(border_kind(&side.style));
            if let Some(color) = &side.color {
                format = format.set_border_right_color(lower_color(color));
            }
        }
    }

    if let Some(alignment) = &style.alignment {
        if let Some(h) = alignment.horizontal.as_deref().and_then(horizontal_align) {
            format = format.set_align(h);
        }
        if let Some(v) = alignment.vertical.as_deref().and_then(vertical_align) {
            format = format.set_align(v);
        }
        if alignment.wrap_text {
            format = format.set_text_wrap();
        }
    }

    if let Some(number_format) = &style.number_format {
        format = format.set_num_format(number_format);
    }

    if let Some(protection) = style.protection {
        if !protection.locked {
            format = format.set_unlocked();
        }
        if protection.hidden {
            format = format.set_hidden();
        }
    }

    format
}

fn lower_color(color: &Color) -> XlsxColor {
    let rgb = match color {
        Color::Rgb(hex) => {
            let tail = if hex.len() > 6 { &hex[hex.len() - 6..] } else { hex.as_str() };
            u32::from_str_radix(tail, 16).unwrap_or(0)
        }
        Color::Theme(idx) => THEME_PALETTE
            .get(*idx as usize)
            .copied()
            .unwrap_or(0x000000),
        Color::Indexed(idx) => INDEXED_PALETTE
            .get(*idx as usize)
            .copied()
            .unwrap_or(0x000000),
    };
    XlsxColor::RGB(rgb)
}

fn border_kind(style: &str) -> FormatBorder {
    match style {
        "thin" => FormatBorder::Thin,
        "medium" => FormatBorder::Medium,
        "dashed" => FormatBorder::Dashed,
        "dotted" => FormatBorder::Dotted,
        "thick" => FormatBorder::Thick,
        "double" => FormatBorder::Double,
        "hair" => FormatBorder::Hair,
        "mediumDashed" | "mediumdashed" => FormatBorder::MediumDashed,
        "dashDot" | "dashdot" => FormatBorder::DashDot,
        "mediumDashDot" | "mediumdashdot" => FormatBorder::MediumDashDot,
        "dashDotDot" | "dashdotdot" => FormatBorder::DashDotDot,
        "mediumDashDotDot" | "mediumdashdotdot" => FormatBorder::MediumDashDotDot,
        "slantDashDot" | "slantdashdot" => FormatBorder::SlantDashDot,
        _ => FormatBorder::Thin,
    }
}

fn horizontal_align(keyword: &str) -> Option<FormatAlign> {
    match keyword {
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "centercontinuous" => Some(FormatAlign::CenterAcross),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "distributed" => Some(FormatAlign::Distributed),
        _ => None,
    }
}

fn vertical_align(keyword: &str) -> Option<FormatAlign> {
    match keyword {
        "top" => Some(FormatAlign::Top),
        "center" => Some(FormatAlign::VerticalCenter),
        "bottom" => Some(FormatAlign::Bottom),
        "justify" => Some(FormatAlign::VerticalJustify),
        "distributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_color_literal() {
        assert_eq!(lower_color(&Color::rgb("FFFF0000")), XlsxColor::RGB(0xFF0000));
        assert_eq!(lower_color(&Color::rgb("00B050")), XlsxColor::RGB(0x00B050));
        assert_eq!(lower_color(&Color::Rgb("junk".to_string())), XlsxColor::RGB(0));
    }

    #[test]
    fn test_lower_color_palettes() {
        assert_eq!(lower_color(&Color::Theme(4)), XlsxColor::RGB(0x4472C4));
        assert_eq!(lower_color(&Color::Indexed(5)), XlsxColor::RGB(0xFFFF00));
        assert_eq!(lower_color(&Color::Theme(99)), XlsxColor::RGB(0x000000));
    }

    #[test]
    fn test_border_kind_fallback() {
        assert_eq!(border_kind("thin"), FormatBorder::Thin);
        assert_eq!(border_kind("double"), FormatBorder::Double);
        assert_eq!(border_kind("mystery"), FormatBorder::Thin);
    }
}
