//! Cell style value types.
//!
//! These mirror the style facets the copy engine carries between workbooks:
//! font, fill, borders, alignment, number format, and protection. Each facet
//! is optional so an unstyled cell costs nothing.

/// A color in one of the three encodings an xlsx file can use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Literal ARGB or RGB hex string, stored uppercased (e.g. "FFFFFF00").
    Rgb(String),
    /// Reference into the workbook theme palette.
    Theme(u32),
    /// Legacy indexed palette slot.
    Indexed(u32),
}

impl Color {
    pub fn rgb(hex: impl Into<String>) -> Self {
        Color::Rgb(hex.into().to_ascii_uppercase())
    }

    /// True if the color is a literal whose hex ends with `suffix`
    /// (case-insensitive). ARGB values carry a leading alpha byte, so the
    /// comparison looks at the tail only.
    pub fn rgb_ends_with(&self, suffix: &str) -> bool {
        match self {
            Color::Rgb(hex) => hex.to_ascii_uppercase().ends_with(&suffix.to_ascii_uppercase()),
            _ => false,
        }
    }
}

/// Fill pattern kinds the engine distinguishes. Anything that is not solid
/// is irrelevant to heading detection and is carried through opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPattern {
    #[default]
    None,
    Solid,
    Patterned,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontStyle {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub pattern: FillPattern,
    pub foreground: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderSide {
    /// Border style keyword as written in the file ("thin", "medium", ...).
    pub style: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderSet {
    pub top: Option<BorderSide>,
    pub bottom: Option<BorderSide>,
    pub left: Option<BorderSide>,
    pub right: Option<BorderSide>,
}

impl BorderSet {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignStyle {
    /// Horizontal alignment keyword ("left", "center", "right", ...).
    pub horizontal: Option<String>,
    /// Vertical alignment keyword ("top", "center", "bottom", ...).
    pub vertical: Option<String>,
    pub wrap_text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectionStyle {
    pub locked: bool,
    pub hidden: bool,
}

/// The full style of one cell. `Default` is the unstyled cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
    pub borders: Option<BorderSet>,
    pub alignment: Option<AlignStyle>,
    pub number_format: Option<String>,
    pub protection: Option<ProtectionStyle>,
}

impl CellStyle {
    pub fn is_default(&self) -> bool {
        self.font.is_none()
            && self.fill.is_none()
            && self.borders.is_none()
            && self.alignment.is_none()
            && self.number_format.is_none()
            && self.protection.is_none()
    }
}
