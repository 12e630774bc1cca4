//! Precomputed per-item search data.

use crate::transliterate::{build_token_variants, TokenSet};

/// Text fields of a catalog entry that take part in matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFields<'a> {
    /// Display name
    pub name: &'a str,
    /// Car model or category label
    pub model: &'a str,
    /// Primary (TOK) code
    pub primary_code: &'a str,
    /// Secondary (OEM) code
    pub secondary_code: &'a str,
}

impl SearchFields<'_> {
    /// Non-empty fields joined by single spaces.
    fn haystack(&self) -> String {
        [self.name, self.model, self.primary_code, self.secondary_code]
            .into_iter()
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Search data derived once from an item's fields.
///
/// Built when an item is ingested and never modified afterwards, so
/// concurrent searches only ever read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    tokens: TokenSet,
    text: String,
    name: String,
    model: String,
    primary_code: String,
    secondary_code: String,
}

impl SearchIndex {
    /// Build the index for one item. Empty fields are skipped.
    pub fn new(fields: SearchFields<'_>) -> Self {
        let haystack = fields.haystack();

        Self {
            tokens: build_token_variants(&haystack),
            text: haystack.to_lowercase(),
            name: fields.name.to_lowercase(),
            model: fields.model.to_lowercase(),
            primary_code: fields.primary_code.to_lowercase(),
            secondary_code: fields.secondary_code.to_lowercase(),
        }
    }

    /// Token variants of name, model and both codes.
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Lowercased name, model and codes joined by spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased model label.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Lowercased primary code, empty if the item has none.
    pub fn primary_code(&self) -> &str {
        &self.primary_code
    }

    /// Lowercased secondary code, empty if the item has none.
    pub fn secondary_code(&self) -> &str {
        &self.secondary_code
    }
}

/// Anything that can be ranked by the matcher.
pub trait Searchable {
    /// The item's precomputed search index.
    fn search_index(&self) -> &SearchIndex;
}

impl Searchable for SearchIndex {
    fn search_index(&self) -> &SearchIndex {
        self
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_index(&self) -> &SearchIndex {
        (**self).search_index()
    }
}

/// Token set for a catalog entry: variants of name, model and both codes.
///
/// Item tokens are not synonym-expanded; only queries are. Synonym matches
/// are found at comparison time instead, which keeps item-side matching
/// precise.
pub fn build_search_tokens(fields: SearchFields<'_>) -> TokenSet {
    build_token_variants(&fields.haystack())
}
