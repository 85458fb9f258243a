//! Content normalisation for matching questions by text.

/// Trim, collapse internal whitespace runs to one space, and case-fold.
pub fn normalise_content(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
