//! Fuzzy matching algorithms.

use serde::{Deserialize, Serialize};

/// Maximum edit distance at which two tokens still count as a fuzzy match.
pub const MAX_EDIT_DISTANCE: usize = 3;

/// Tokens shorter than this never fuzzy-match anything but themselves.
pub const MIN_TOKEN_LENGTH_FOR_FUZZY: usize = 3;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Thresholds for token-level fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Largest accepted edit distance
    pub max_edit_distance: usize,
    /// Minimum token length, in characters, for fuzzy comparison
    pub min_token_len: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: MAX_EDIT_DISTANCE,
            min_token_len: MIN_TOKEN_LENGTH_FOR_FUZZY,
        }
    }
}

impl FuzzyConfig {
    /// Check whether two tokens are within the edit-distance threshold.
    ///
    /// Identical tokens always match. Short tokens only match exactly,
    /// since one edit on a two-letter word ("ой" vs "уу") is too permissive.
    /// The length difference is checked before running the quadratic
    /// distance computation.
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }

        let a_len = a.chars().count();
        let b_len = b.chars().count();
        if a_len < self.min_token_len || b_len < self.min_token_len {
            return false;
        }

        if a_len.abs_diff(b_len) > self.max_edit_distance {
            return false;
        }

        levenshtein_distance(a, b) <= self.max_edit_distance
    }
}

/// Check two tokens with the default thresholds.
///
/// See [`FuzzyConfig::is_match`].
pub fn is_fuzzy_match(a: &str, b: &str) -> bool {
    FuzzyConfig::default().is_match(a, b)
}
