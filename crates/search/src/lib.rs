//! Multilingual product matching for auto-part catalogs.
//!
//! This crate provides:
//! - Text normalization and tokenization
//! - Cyrillic Mongolian to Latin transliteration
//! - Synonym groups for part names, car models and slang
//! - Levenshtein-based fuzzy token matching
//! - Weighted relevance scoring with a stable ranking
//! - Greeting and filler-word stripping for chat-style queries
//! - Fallback suggestions for queries with no match
//!
//! # Example
//!
//! ```
//! use partmatch_search::{Matcher, SearchFields, SearchIndex};
//!
//! let catalog = vec![SearchIndex::new(SearchFields {
//!     name: "Тоормосны колодок",
//!     model: "Prius 30",
//!     primary_code: "TOK310",
//!     secondary_code: "04465-47060",
//! })];
//!
//! let matcher = Matcher::default();
//! let ranked = matcher.rank("toormos kolodok p30", &catalog, Some(5));
//! assert_eq!(ranked.len(), 1);
//! assert!(ranked[0].counts.exact >= 1);
//! ```

mod fallback;
mod fuzzy;
mod index;
mod normalize;
mod relevance;
mod stopwords;
mod synonyms;
mod transliterate;

pub use fallback::{extract_categories, extract_model_names, find_by_model};
pub use fuzzy::{
    is_fuzzy_match, levenshtein_distance, FuzzyConfig, MAX_EDIT_DISTANCE,
    MIN_TOKEN_LENGTH_FOR_FUZZY,
};
pub use index::{build_search_tokens, SearchFields, SearchIndex, Searchable};
pub use normalize::{normalize, tokenize};
pub use relevance::{
    find_matches, MatchCounts, MatchKind, MatchResult, Matcher, PreparedQuery, ScoringConfig,
    TokenMatch, DEFAULT_STRATEGIES,
};
pub use stopwords::{is_stopword, strip_stopwords};
pub use synonyms::SynonymTable;
pub use transliterate::{build_token_variants, transliterate, TokenSet};
