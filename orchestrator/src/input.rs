//! Input bounding helpers: character-budget truncation and count clamping

use std::borrow::Cow;

/// Cut `text` after `budget` characters and append `marker`.
///
/// The cut is a plain character offset; sentence and paragraph boundaries
/// are not respected. Text within the budget is returned borrowed and
/// unchanged.
pub fn truncate_chars<'a>(text: &'a str, budget: usize, marker: &str) -> Cow<'a, str> {
    match text.char_indices().nth(budget) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + marker.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(marker);
            Cow::Owned(truncated)
        }
    }
}

/// Clamp a requested count into `[min, max]`, silently.
pub fn clamp_count(requested: i64, min: u32, max: u32) -> u32 {
    requested.clamp(i64::from(min), i64::from(max)) as u32
}
