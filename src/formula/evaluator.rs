//! Restricted evaluator for rate formulas.
//!
//! Used when a rate cell holds a formula and the workbook carries no cached
//! result for it. The formula text comes from uploaded files, so evaluation
//! is sandboxed to cell substitution, the four arithmetic operators, and
//! ROUND; everything else collapses to 0.0, which callers treat as "no rate
//! available". This module must never grow into a general evaluator.

use super::parser::{Expr, Parser};
use super::tokenizer::Tokenizer;
use crate::model::{CellValue, Sheet};

/// Recursion budget for formula-to-formula reference chains. Cycles in
/// hand-authored sheets bottom out here instead of hanging.
pub const MAX_RESOLUTION_DEPTH: u32 = 25;

/// Evaluate a rate formula against its sheet. Returns 0.0 for anything the
/// restricted grammar does not cover, for unresolvable references, and for
/// arithmetic faults; never panics and never raises.
pub fn evaluate_formula(sheet: &Sheet, formula: &str) -> f64 {
    evaluate_with_depth(sheet, formula, MAX_RESOLUTION_DEPTH).unwrap_or(0.0)
}

/// Excel-style ROUND: half away from zero, unlike Rust's `round` only in
/// that negative ndigits scale down (ROUND(1234, -2) == 1200).
pub fn round_half_away_from_zero(value: f64, ndigits: i32) -> f64 {
    let factor = 10f64.powi(ndigits);
    let scaled = value * factor;
    if scaled >= 0.0 {
        (scaled + 0.5).floor() / factor
    } else {
        -((-scaled + 0.5).floor()) / factor
    }
}

fn evaluate_with_depth(sheet: &Sheet, formula: &str, depth: u32) -> Option<f64> {
    if depth == 0 {
        return None;
    }
    let tokens = Tokenizer::new(formula).tokenize().ok()?;
    let expr = Parser::new(tokens).parse().ok()?;
    eval_expr(sheet, &expr, depth)
}

fn eval_expr(sheet: &Sheet, expr: &Expr, depth: u32) -> Option<f64> {
    match expr {
        Expr::Number(n) => Some(*n),
        Expr::Negate(inner) => eval_expr(sheet, inner, depth).map(|v| -v),
        Expr::BinaryOp { op, left, right } => {
            let l = eval_expr(sheet, left, depth)?;
            let r = eval_expr(sheet, right, depth)?;
            let result = match op {
                '+' => l + r,
                '-' => l - r,
                '*' => l * r,
                '/' => {
                    if r == 0.0 {
                        return None;
                    }
                    l / r
                }
                _ => return None,
            };
            result.is_finite().then_some(result)
        }
        Expr::Round { value, digits } => {
            let v = eval_expr(sheet, value, depth)?;
            let d = eval_expr(sheet, digits, depth)?;
            Some(round_half_away_from_zero(v, d as i32))
        }
        Expr::CellRef { row, col } => resolve_cell(sheet, *row, *col, depth),
    }
}

/// Resolve a referenced cell to a number. A referenced formula cell is
/// evaluated recursively with one depth unit spent.
fn resolve_cell(sheet: &Sheet, row: u32, col: u32, depth: u32) -> Option<f64> {
    match sheet.value(row, col) {
        CellValue::Empty => Some(0.0),
        CellValue::Number(n) => Some(n),
        CellValue::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        CellValue::Formula(f) => evaluate_with_depth(sheet, &f, depth - 1),
        CellValue::Text(s) => {
            if s.starts_with('=') {
                evaluate_with_depth(sheet, &s, depth - 1)
            } else {
                s.trim().parse::<f64>().ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with(cells: &[((u32, u32), CellValue)]) -> Sheet {
        let mut sheet = Sheet::new("Master Datas");
        for ((row, col), value) in cells {
            sheet.set_value(*row, *col, value.clone());
        }
        sheet
    }

    #[test]
    fn test_plain_arithmetic() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "=2+3*4"), 14.0);
        assert_eq!(evaluate_formula(&sheet, "=(2+3)*4"), 20.0);
        assert_eq!(evaluate_formula(&sheet, "=10/4"), 2.5);
        assert_eq!(evaluate_formula(&sheet, "=-3+1"), -2.0);
    }

    #[test]
    fn test_cell_substitution() {
        let sheet = sheet_with(&[
            ((14, 7), CellValue::Number(300.0)),
            ((14, 9), CellValue::Number(8.0)),
        ]);
        assert_eq!(evaluate_formula(&sheet, "=G14*I14"), 2400.0);
    }

    #[test]
    fn test_recursive_formula_reference() {
        let sheet = sheet_with(&[
            ((1, 1), CellValue::Formula("=B1*2".to_string())),
            ((1, 2), CellValue::Number(21.0)),
        ]);
        assert_eq!(evaluate_formula(&sheet, "=A1+1"), 43.0);
    }

    #[test]
    fn test_cycle_bottoms_out() {
        let sheet = sheet_with(&[
            ((1, 1), CellValue::Formula("=B1".to_string())),
            ((1, 2), CellValue::Formula("=A1".to_string())),
        ]);
        assert_eq!(evaluate_formula(&sheet, "=A1"), 0.0);
    }

    #[test]
    fn test_empty_cell_is_zero() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "=A1+5"), 5.0);
    }

    #[test]
    fn test_numeric_text_resolves() {
        let sheet = sheet_with(&[((1, 1), CellValue::Text(" 12.5 ".to_string()))]);
        assert_eq!(evaluate_formula(&sheet, "=A1*2"), 25.0);
    }

    #[test]
    fn test_non_numeric_text_yields_zero() {
        let sheet = sheet_with(&[((1, 1), CellValue::Text("Nos".to_string()))]);
        assert_eq!(evaluate_formula(&sheet, "=A1*2"), 0.0);
    }

    #[test]
    fn test_unknown_function_yields_zero() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "=VLOOKUP(A1,B:B,1)"), 0.0);
    }

    #[test]
    fn test_cross_sheet_yields_zero() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "=Rates!B2+1"), 0.0);
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "=5/0"), 0.0);
        assert_eq!(evaluate_formula(&sheet, "=5/A1"), 0.0);
    }

    #[test]
    fn test_malformed_yields_zero() {
        let sheet = Sheet::new("s");
        assert_eq!(evaluate_formula(&sheet, "="), 0.0);
        assert_eq!(evaluate_formula(&sheet, "=((1+2)"), 0.0);
        assert_eq!(evaluate_formula(&sheet, "=A1 B2"), 0.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_half_away_from_zero(2.5, 0), 3.0);
        assert_eq!(round_half_away_from_zero(-2.5, 0), -3.0);
        assert_eq!(round_half_away_from_zero(2.4, 0), 2.0);
        assert_eq!(round_half_away_from_zero(1.25, 1), 1.3);
        assert_eq!(round_half_away_from_zero(-1.25, 1), -1.3);
        assert_eq!(round_half_away_from_zero(1234.0, -2), 1200.0);
    }

    #[test]
    fn test_round_in_formula() {
        let sheet = sheet_with(&[((5, 10), CellValue::Number(17.5))]);
        assert_eq!(evaluate_formula(&sheet, "=ROUND(J5, 0)"), 18.0);
        assert_eq!(evaluate_formula(&sheet, "=ROUND(J5/7, 2)"), 2.5);
        assert_eq!(evaluate_formula(&sheet, "=ROUND(-2.5, 0)"), -3.0);
    }
}
