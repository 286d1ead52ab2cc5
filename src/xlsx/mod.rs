//! The xlsx I/O boundary.
//!
//! Reading uses umya-spreadsheet because the engine needs styles (fills,
//! fonts, merges, dimensions), which value-oriented readers do not expose;
//! writing uses rust_xlsxwriter. Everything in between works on the model
//! types only.

mod reader;
mod writer;

pub use reader::{read_workbook, Workbook};
pub use writer::write_workbook;
