//! FILENAME: table-model/src/strings.rs
//! PURPOSE: Column label formatting helpers.
//! CONTEXT: Long camel-case identifiers ("documentContentLength") render as
//! one unbreakable word and blow out narrow table layouts. Inserting a
//! zero-width space before each hump gives the layout engine a place to wrap
//! without changing the visible text.

/// The zero-width space (U+200B) used as an invisible break opportunity.
pub const WORD_BREAK: char = '\u{200B}';

/// Inserts a zero-width space before every upper-case letter that follows a
/// lower-case letter or digit. Idempotent: the inserted character is neither,
/// so re-running the pass finds no new humps.
pub fn insert_breaks_at_camel_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut after_lower = false;
    for c in label.chars() {
        if c.is_uppercase() && after_lower {
            out.push(WORD_BREAK);
        }
        out.push(c);
        after_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    out
}
