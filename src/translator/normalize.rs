//! Phrase normalization
//!
//! Lower-cases and trims. Punctuation is left in place: rule patterns depend
//! on it (quotes around titles, decimal points in ratings).

/// Returns the normalized form of a raw phrase
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
