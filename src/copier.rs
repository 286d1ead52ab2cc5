//! Block copier: moves a rectangular window of cells between sheets with
//! values, translated formulas, styles, merges, and explicit dimensions.
//!
//! Style copying is best-effort per attribute: a malformed font never stops
//! the fill, and no style problem ever stops the value. Callers get the
//! exact record of what happened in [`CopyOutcome`] instead of silence.

use std::collections::BTreeSet;

use tracing::debug;

use crate::formula::shift_formula;
use crate::model::{cell_name, CellStyle, CellValue, Color, Sheet};
use crate::normalize::normalize_text;

/// The style facets copied cell by cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StyleAttr {
    Font,
    Fill,
    Border,
    Alignment,
    NumberFormat,
    Protection,
}

/// What a block copy actually did.
#[derive(Debug, Default)]
pub struct CopyOutcome {
    /// Cells whose value was written to the destination.
    pub cells_copied: usize,
    /// Style facets that applied successfully at least once.
    pub styles_applied: BTreeSet<StyleAttr>,
    /// Per-cell problems that were skipped over: failed style facets and
    /// formulas copied verbatim after a failed translation.
    pub warnings: Vec<String>,
}

/// Copy the window `[src_min_row..=src_max_row] x [col_start..=col_end]`
/// from `src` into `dest`, anchored at (`dst_start_row`, `dst_start_col`).
///
/// Merged ranges wholly inside the window are replicated at the destination
/// with the same offsets; their non-top-left cells are not written
/// individually. Formulas are re-anchored so relative references stay
/// correct at the new location; if a formula cannot be translated it is
/// copied verbatim and noted in the outcome.
#[allow(clippy::too_many_arguments)]
pub fn copy_block(
    src: &Sheet,
    dest: &mut Sheet,
    src_min_row: u32,
    src_max_row: u32,
    col_start: u32,
    col_end: u32,
    dst_start_row: u32,
    dst_start_col: u32,
) -> CopyOutcome {
    let mut outcome = CopyOutcome::default();
    let row_offset = dst_start_row as i64 - src_min_row as i64;
    let col_offset = dst_start_col as i64 - col_start as i64;

    // 1. Explicit column widths.
    for col in col_start..=col_end {
        if let Some(width) = src.col_width(col) {
            dest.set_col_width((col as i64 + col_offset) as u32, width);
        }
    }

    // 2. Explicit row heights.
    for row in src_min_row..=src_max_row {
        if let Some(height) = src.row_height(row) {
            dest.set_row_height((row as i64 + row_offset) as u32, height);
        }
    }

    // 3. Merges wholly inside the window. Discovered up front, replicated
    // only after every constituent cell is written, so the destination
    // merge is created exactly once over finished cells.
    let merges = src
        .merges
        .contained_in(src_min_row, src_max_row, col_start, col_end);

    // 4. Cell copy loop.
    for row in src_min_row..=src_max_row {
        for col in col_start..=col_end {
            if let Some(merge) = merges.iter().find(|m| m.contains(row, col)) {
                if merge.top_left() != (row, col) {
                    // implied by the replicated merge
                    continue;
                }
            }

            // A cell inside a merge reads from the merge's anchor, which
            // may sit away from the nominal coordinate when the merge
            // reaches outside the window.
            let (src_row, src_col) = src
                .merges
                .find_containing(row, col)
                .map(|m| m.top_left())
                .unwrap_or((row, col));

            let Some(source_cell) = src.cell(src_row, src_col) else {
                continue;
            };

            let dst_row = (row as i64 + row_offset) as u32;
            let dst_col = (col as i64 + col_offset) as u32;

            let value = translate_value(
                &source_cell.value,
                dst_row as i64 - src_row as i64,
                dst_col as i64 - src_col as i64,
                src_row,
                src_col,
                &mut outcome,
            );
            dest.set_value(dst_row, dst_col, value);
            outcome.cells_copied += 1;

            copy_style(
                &source_cell.style,
                dest,
                dst_row,
                dst_col,
                src_row,
                src_col,
                &mut outcome,
            );
        }
    }

    // 5. Merge replication.
    for merge in &merges {
        match merge.translate(row_offset, col_offset) {
            Some(translated) => dest.merges.add(translated),
            None => outcome.warnings.push(format!(
                "merge at {} could not be placed at the destination",
                cell_name(merge.min_row, merge.min_col)
            )),
        }
    }

    debug!(
        cells = outcome.cells_copied,
        warnings = outcome.warnings.len(),
        "copied block rows {}..={} to row {}",
        src_min_row,
        src_max_row,
        dst_start_row
    );
    outcome
}

/// Value translation for one cell: formulas are re-anchored by the delta
/// between their actual source coordinate and their destination, plain
/// strings are normalized, everything else passes through.
fn translate_value(
    value: &CellValue,
    row_delta: i64,
    col_delta: i64,
    src_row: u32,
    src_col: u32,
    outcome: &mut CopyOutcome,
) -> CellValue {
    if let Some(formula) = value.formula() {
        return match shift_formula(formula, row_delta, col_delta) {
            Ok(translated) => CellValue::Formula(translated),
            Err(e) => {
                outcome.warnings.push(format!(
                    "{}: formula copied untranslated: {}",
                    cell_name(src_row, src_col),
                    e
                ));
                CellValue::Formula(formula.to_string())
            }
        };
    }
    match value {
        CellValue::Text(s) => CellValue::Text(normalize_text(s)),
        other => other.clone(),
    }
}

fn copy_style(
    src_style: &CellStyle,
    dest: &mut Sheet,
    dst_row: u32,
    dst_col: u32,
    src_row: u32,
    src_col: u32,
    outcome: &mut CopyOutcome,
) {
    if src_style.is_default() {
        return;
    }
    let mut dst_style = dest
        .cell(dst_row, dst_col)
        .map(|c| c.style.clone())
        .unwrap_or_default();

    let attempts: [(StyleAttr, Result<bool, String>); 6] = [
        (StyleAttr::Font, copy_font(src_style, &mut dst_style)),
        (StyleAttr::Fill, copy_fill(src_style, &mut dst_style)),
        (StyleAttr::Border, copy_border(src_style, &mut dst_style)),
        (StyleAttr::Alignment, copy_alignment(src_style, &mut dst_style)),
        (
            StyleAttr::NumberFormat,
            copy_number_format(src_style, &mut dst_style),
        ),
        (
            StyleAttr::Protection,
            copy_protection(src_style, &mut dst_style),
        ),
    ];

    for (attr, result) in attempts {
        match result {
            Ok(true) => {
                outcome.styles_applied.insert(attr);
            }
            Ok(false) => {}
            Err(e) => outcome
                .warnings
                .push(format!("{}: {:?}: {}", cell_name(src_row, src_col), attr, e)),
        }
    }

    dest.set_style(dst_row, dst_col, dst_style);
}

// Each facet helper copies one attribute or reports why it could not; a
// failed facet leaves the destination's existing facet alone.

fn copy_font(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(font) = &src.font else {
        return Ok(false);
    };
    if let Some(size) = font.size {
        if !size.is_finite() || size <= 0.0 {
            return Err(format!("bad font size {}", size));
        }
    }
    if let Some(color) = &font.color {
        validate_color(color)?;
    }
    dst.font = Some(font.clone());
    Ok(true)
}

fn copy_fill(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(fill) = &src.fill else {
        return Ok(false);
    };
    if let Some(color) = &fill.foreground {
        validate_color(color)?;
    }
    dst.fill = Some(fill.clone());
    Ok(true)
}

fn copy_border(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(borders) = &src.borders else {
        return Ok(false);
    };
    for side in [&borders.top, &borders.bottom, &borders.left, &borders.right]
        .into_iter()
        .flatten()
    {
        if side.style.is_empty() {
            return Err("empty border style".to_string());
        }
        if let Some(color) = &side.color {
            validate_color(color)?;
        }
    }
    dst.borders = Some(borders.clone());
    Ok(true)
}

fn copy_alignment(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(alignment) = &src.alignment else {
        return Ok(false);
    };
    dst.alignment = Some(alignment.clone());
    Ok(true)
}

fn copy_number_format(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(format) = &src.number_format else {
        return Ok(false);
    };
    dst.number_format = Some(format.clone());
    Ok(true)
}

fn copy_protection(src: &CellStyle, dst: &mut CellStyle) -> Result<bool, String> {
    let Some(protection) = src.protection else {
        return Ok(false);
    };
    dst.protection = Some(protection);
    Ok(true)
}

fn validate_color(color: &Color) -> Result<(), String> {
    match color {
        Color::Rgb(hex) => {
            if (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                Ok(())
            } else {
                Err(format!("bad color literal {:?}", hex))
            }
        }
        Color::Theme(_) | Color::Indexed(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FillPattern, FillStyle, FontStyle, MergedRegion};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_values_and_offsets() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(10, 1, text("Door - 1.2m"));
        src.set_value(12, 4, text("Flush door"));
        src.set_value(14, 10, CellValue::Number(2400.0));

        let mut dest = Sheet::new("Output");
        let outcome = copy_block(&src, &mut dest, 10, 15, 1, 10, 1, 1);

        assert_eq!(dest.value_text(1, 1), "Door - 1.2m");
        assert_eq!(dest.value_text(3, 4), "Flush door");
        assert_eq!(dest.value(5, 10), CellValue::Number(2400.0));
        assert_eq!(outcome.cells_copied, 3);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_formula_translation_on_copy() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(14, 10, CellValue::Formula("=G14*I14".to_string()));

        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 10, 15, 1, 10, 1, 1);

        assert_eq!(dest.value(5, 10), CellValue::Formula("=G5*I5".to_string()));
    }

    #[test]
    fn test_untranslatable_formula_copied_verbatim() {
        let mut src = Sheet::new("Master Datas");
        // shifting up by 9 rows pushes A1 off the sheet
        src.set_value(10, 2, CellValue::Formula("=A1+1".to_string()));

        let mut dest = Sheet::new("Output");
        let outcome = copy_block(&src, &mut dest, 10, 10, 1, 10, 1, 1);

        assert_eq!(dest.value(1, 2), CellValue::Formula("=A1+1".to_string()));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("untranslated"));
    }

    #[test]
    fn test_text_formula_string_is_translated() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(5, 1, text("=B5*2"));
        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 5, 5, 1, 10, 8, 1);
        assert_eq!(dest.value(8, 1), CellValue::Formula("=B8*2".to_string()));
    }

    #[test]
    fn test_plain_text_is_normalized() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(1, 1, text("Door \u{2014} 1.2m"));
        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 1, 1, 1, 10, 1, 1);
        assert_eq!(dest.value_text(1, 1), "Door - 1.2m");
    }

    #[test]
    fn test_merge_replicated_and_inner_cell_skipped() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(5, 1, text("merged heading"));
        src.set_value(5, 2, text("shadow value"));
        src.merges.add(MergedRegion::new(5, 1, 5, 2));

        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 5, 5, 1, 10, 100, 1);

        assert_eq!(dest.value_text(100, 1), "merged heading");
        assert!(dest.cell(100, 2).is_none());
        assert_eq!(
            dest.merges.iter().copied().collect::<Vec<_>>(),
            vec![MergedRegion::new(100, 1, 100, 2)]
        );
    }

    #[test]
    fn test_merge_outside_window_not_replicated() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(5, 9, text("wide"));
        // reaches past column J, so it is not wholly inside the window
        src.merges.add(MergedRegion::new(5, 9, 5, 12));

        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 5, 5, 1, 10, 1, 1);

        assert!(dest.merges.is_empty());
        // cells still resolve through the merge anchor
        assert_eq!(dest.value_text(1, 9), "wide");
        assert_eq!(dest.value_text(1, 10), "wide");
    }

    #[test]
    fn test_dimensions_carried() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(3, 2, text("x"));
        src.set_col_width(2, 42.0);
        src.set_row_height(3, 28.5);

        let mut dest = Sheet::new("Output");
        copy_block(&src, &mut dest, 3, 3, 1, 10, 7, 1);

        assert_eq!(dest.col_width(2), Some(42.0));
        assert_eq!(dest.row_height(7), Some(28.5));
    }

    #[test]
    fn test_style_facets_copied_and_recorded() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(1, 1, text("styled"));
        src.set_style(
            1,
            1,
            CellStyle {
                font: Some(FontStyle {
                    bold: true,
                    color: Some(Color::rgb("FFFF0000")),
                    ..Default::default()
                }),
                number_format: Some("0.00".to_string()),
                ..Default::default()
            },
        );

        let mut dest = Sheet::new("Output");
        let outcome = copy_block(&src, &mut dest, 1, 1, 1, 10, 1, 1);

        let copied = &dest.cell(1, 1).unwrap().style;
        assert!(copied.font.as_ref().unwrap().bold);
        assert_eq!(copied.number_format.as_deref(), Some("0.00"));
        assert!(outcome.styles_applied.contains(&StyleAttr::Font));
        assert!(outcome.styles_applied.contains(&StyleAttr::NumberFormat));
        assert!(!outcome.styles_applied.contains(&StyleAttr::Fill));
    }

    #[test]
    fn test_bad_style_facet_does_not_block_value_or_other_facets() {
        let mut src = Sheet::new("Master Datas");
        src.set_value(1, 1, text("v"));
        src.set_style(
            1,
            1,
            CellStyle {
                font: Some(FontStyle {
                    color: Some(Color::Rgb("not-a-color".to_string())),
                    ..Default::default()
                }),
                fill: Some(FillStyle {
                    pattern: FillPattern::Solid,
                    foreground: Some(Color::rgb("FFFFFF00")),
                }),
                ..Default::default()
            },
        );

        let mut dest = Sheet::new("Output");
        let outcome = copy_block(&src, &mut dest, 1, 1, 1, 10, 1, 1);

        assert_eq!(dest.value_text(1, 1), "v");
        let copied = &dest.cell(1, 1).unwrap().style;
        assert!(copied.font.is_none());
        assert!(copied.fill.is_some());
        assert!(outcome.styles_applied.contains(&StyleAttr::Fill));
        assert!(!outcome.styles_applied.contains(&StyleAttr::Font));
        assert_eq!(outcome.warnings.len(), 1);
    }
}
