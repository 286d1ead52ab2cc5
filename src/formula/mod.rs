//! Formula handling: relative-reference translation for copied cells and
//! the restricted evaluator used by the day-rate extractor.

mod evaluator;
mod parser;
mod tokenizer;
mod translate;

pub use evaluator::{evaluate_formula, round_half_away_from_zero, MAX_RESOLUTION_DEPTH};
pub use translate::{shift_formula, TranslateError};
