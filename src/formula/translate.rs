//! Relative-reference translation for copied formulas.
//!
//! When a block moves, every relative A1 reference inside its formulas must
//! shift by the same delta, exactly as a spreadsheet does on copy/paste.
//! `$`-anchored components stay put. A shift that would leave the sheet is
//! an error so the copier can fall back to the untranslated text.

use regex::Regex;

use crate::model::{column_letter, column_number};

/// Sheet bounds of the xlsx format.
const MAX_ROW: i64 = 1_048_576;
const MAX_COL: i64 = 16_384;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslateError {
    pub message: String,
}

impl TranslateError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Formula translation error: {}", self.message)
    }
}

impl std::error::Error for TranslateError {}

/// Shift every relative reference in `formula` by the given deltas.
///
/// Example: `=G148*I148` with a row offset of +10 becomes `=G158*I158`.
pub fn shift_formula(
    formula: &str,
    row_offset: i64,
    col_offset: i64,
) -> Result<String, TranslateError> {
    let had_equals = formula.starts_with('=');
    let body = formula.strip_prefix('=').unwrap_or(formula);

    let cell_ref_pattern = Regex::new(r"(\$?)([A-Za-z]{1,3})(\$?)([1-9][0-9]*)")
        .map_err(|e| TranslateError::new(format!("regex error: {}", e)))?;

    let mut result = body.to_string();

    // Replace in reverse order so earlier match offsets stay valid.
    let matches: Vec<_> = cell_ref_pattern.find_iter(body).collect();

    for match_obj in matches.iter().rev() {
        if !is_reference_site(body, match_obj.start(), match_obj.end()) {
            continue;
        }

        let captures = match cell_ref_pattern.captures(match_obj.as_str()) {
            Some(c) => c,
            None => continue,
        };
        let col_abs = !captures.get(1).map_or(true, |m| m.as_str().is_empty());
        let letters = captures.get(2).map_or("", |m| m.as_str());
        let row_abs = !captures.get(3).map_or(true, |m| m.as_str().is_empty());
        let digits = captures.get(4).map_or("", |m| m.as_str());

        let Some(col) = column_number(letters) else {
            continue;
        };
        let Ok(row) = digits.parse::<i64>() else {
            continue;
        };
        if col as i64 > MAX_COL || row > MAX_ROW {
            continue; // looks like a ref but is out of the grid: plain text
        }

        let new_col = if col_abs { col as i64 } else { col as i64 + col_offset };
        let new_row = if row_abs { row } else { row + row_offset };

        if new_col < 1 || new_col > MAX_COL || new_row < 1 || new_row > MAX_ROW {
            return Err(TranslateError::new(format!(
                "reference {} shifted off the sheet",
                match_obj.as_str()
            )));
        }

        let replacement = format!(
            "{}{}{}{}",
            if col_abs { "$" } else { "" },
            column_letter(new_col as u32),
            if row_abs { "$" } else { "" },
            new_row
        );
        result.replace_range(match_obj.range(), &replacement);
    }

    Ok(if had_equals {
        format!("={}", result)
    } else {
        result
    })
}

/// Whether a regex hit is really a cell reference and not part of a longer
/// identifier, a function name like `LOG10(`, or text inside a string
/// literal.
fn is_reference_site(body: &str, start: usize, end: usize) -> bool {
    if let Some(prev) = body[..start].chars().next_back() {
        if prev.is_alphanumeric() || prev == '_' || prev == '.' {
            return false;
        }
    }
    if let Some(next) = body[end..].chars().next() {
        if next == '(' || next.is_alphanumeric() || next == '_' {
            return false;
        }
    }
    // An odd number of quotes before the match means we are inside a string.
    let quotes = body[..start].matches('"').count();
    quotes % 2 == 0
}
