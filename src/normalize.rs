//! Text normalization for copied cell values and item-name keys.
//!
//! Backend workbooks are authored in desktop Excel, which likes to smarten
//! punctuation; downstream consumers of the generated files choke on the
//! resulting non-ASCII variants. Every plain-string cell value passes
//! through [`normalize_text`] on its way into an output sheet.

/// Fold visually-similar Unicode punctuation to its ASCII form.
///
/// Idempotent: the output contains none of the mapped characters.
pub fn normalize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            // dash family
            '\u{2014}' | '\u{2013}' | '\u{2212}' | '\u{2010}' | '\u{2011}' | '\u{2012}' => {
                out.push('-')
            }
            // smart single quotes
            '\u{2018}' | '\u{2019}' => out.push('\''),
            // smart double quotes
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Canonical lookup key for an item name: every whitespace run (including
/// embedded newlines) collapses to a single space, ends trimmed.
pub fn normalize_item_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
