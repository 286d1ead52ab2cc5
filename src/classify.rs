//! Heading-cell classifier.
//!
//! Backend authors mark item headings visually: a solid yellow fill with red
//! text. There is no structured marker in the file, so detection keys off
//! those two colors, in any of the three encodings Excel uses for a color
//! (literal RGB, theme reference, legacy indexed palette).

use crate::model::{Cell, CellStyle, Color, FillPattern};

/// Theme palette slots accepted as yellow. Hand-authored files reach these
/// through the standard accent swatches.
const YELLOW_THEME_INDICES: [u32; 3] = [4, 5, 6];
/// Indexed palette slot the authoring convention uses for yellow fills.
const YELLOW_INDEXED: u32 = 6;
/// Indexed palette slot the authoring convention uses for red text.
const RED_INDEXED: u32 = 3;

/// A cell is a heading iff it has a yellow solid fill AND a red font AND a
/// non-empty stripped value.
pub fn is_heading_cell(cell: &Cell) -> bool {
    !cell.value.as_text().trim().is_empty()
        && fill_is_yellow(&cell.style)
        && font_is_red(&cell.style)
}

fn fill_is_yellow(style: &CellStyle) -> bool {
    let Some(fill) = &style.fill else {
        return false;
    };
    if fill.pattern != FillPattern::Solid {
        return false;
    }
    match &fill.foreground {
        Some(color) => match color {
            Color::Rgb(_) => color.rgb_ends_with("FFFF00"),
            Color::Theme(idx) => YELLOW_THEME_INDICES.contains(idx),
            Color::Indexed(idx) => *idx == YELLOW_INDEXED,
        },
        None => false,
    }
}

// Any theme-typed font color is accepted as red. Backend files in the field
// depend on this breadth; see DESIGN.md before narrowing it.
fn font_is_red(style: &CellStyle) -> bool {
    let Some(font) = &style.font else {
        return false;
    };
    match &font.color {
        Some(color) => match color {
            Color::Rgb(_) => color.rgb_ends_with("FF0000"),
            Color::Theme(_) => true,
            Color::Indexed(idx) => *idx == RED_INDEXED,
        },
        None => false,
    }
}
