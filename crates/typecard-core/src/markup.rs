//! Inline bold markup
//!
//! `__` is a toggle, not a pair: every occurrence flips boldness for the
//! text that follows. Unbalanced markup is fine, an odd count simply leaves
//! the tail bold.

use crate::types::TextRun;

/// The two-character bold toggle
pub const DELIMITER: &str = "__";

/// Split `text` into ordered runs, dropping empty fragments
///
/// Never fails: any string is valid markup.
pub fn parse(text: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut bold = false;

    for (i, part) in text.split(DELIMITER).enumerate() {
        if i > 0 {
            bold = !bold;
        }
        if !part.is_empty() {
            runs.push(TextRun::new(part, bold));
        }
    }

    log::trace!("markup: {} runs from {} bytes", runs.len(), text.len());
    runs
}
