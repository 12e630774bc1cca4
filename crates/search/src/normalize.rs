//! Query and catalog text normalization.

/// Punctuation that is replaced by a space before tokenizing.
const STRIPPED_PUNCTUATION: [char; 4] = ['?', '.', ',', '!'];

/// Normalize text for searching.
///
/// Lowercases, replaces `? . , !` with spaces, collapses whitespace runs
/// and trims. The result is stable under repeated application.
///
/// # Example
///
/// ```
/// use partmatch_search::normalize;
///
/// assert_eq!(normalize("  Prius   БАМПЕР?! "), "prius бампер");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace(STRIPPED_PUNCTUATION, " ");
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into normalized tokens.
///
/// Token order follows the input; callers treat the result as a set.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
