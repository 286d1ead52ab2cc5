//! In-memory worksheet model.
//!
//! The extraction and copy engine works against these types only; nothing in
//! the core touches a spreadsheet library. The xlsx module maps real files
//! into and out of this model at the I/O boundary.

mod cell;
mod coord;
mod sheet;
mod style;

pub use cell::{Cell, CellValue};
pub use coord::{cell_name, column_letter, column_number, parse_cell_ref, parse_range};
pub use sheet::{MergeSet, MergedRegion, Sheet};
pub use style::{
    AlignStyle, BorderSet, BorderSide, CellStyle, Color, FillPattern, FillStyle, FontStyle,
    ProtectionStyle,
};
