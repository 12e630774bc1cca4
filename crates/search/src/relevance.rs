//! Relevance scoring and ranking of catalog items against a query.
//!
//! Every query token is tested against an item with an ordered list of
//! strategies. The first strategy that matches decides the token's
//! category and its points; later strategies are not consulted. Code
//! bonuses are added on top for exact TOK/OEM lookups.

use crate::fuzzy::FuzzyConfig;
use crate::index::{SearchIndex, Searchable};
use crate::normalize::normalize;
use crate::synonyms::SynonymTable;
use crate::transliterate::{build_token_variants, TokenSet};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Match categories, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Query token is one of the item's tokens
    Exact,
    /// An item token is in the same synonym group
    Synonym,
    /// An item token is within the edit-distance threshold
    Fuzzy,
    /// Query token occurs inside the item's text
    Substring,
}

/// Default strategy order.
pub const DEFAULT_STRATEGIES: [MatchKind; 4] = [
    MatchKind::Exact,
    MatchKind::Synonym,
    MatchKind::Fuzzy,
    MatchKind::Substring,
];

/// Weights and bonuses used by the [`Matcher`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points per character for an exact token match
    pub exact_weight: f64,
    /// Points per character for a synonym match
    pub synonym_weight: f64,
    /// Points per character for a fuzzy match
    pub fuzzy_weight: f64,
    /// Points per character for a substring match
    pub substring_weight: f64,
    /// Flat bonus when the query contains the item's primary code
    pub primary_code_bonus: f64,
    /// Flat bonus when the query contains the item's secondary code
    pub secondary_code_bonus: f64,
    /// Fuzzy matching thresholds
    pub fuzzy: FuzzyConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            exact_weight: 2.0,
            synonym_weight: 1.8,
            fuzzy_weight: 1.0,
            substring_weight: 0.8,
            primary_code_bonus: 25.0,
            secondary_code_bonus: 15.0,
            fuzzy: FuzzyConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Per-character weight for a match category.
    pub fn weight(&self, kind: MatchKind) -> f64 {
        match kind {
            MatchKind::Exact => self.exact_weight,
            MatchKind::Synonym => self.synonym_weight,
            MatchKind::Fuzzy => self.fuzzy_weight,
            MatchKind::Substring => self.substring_weight,
        }
    }
}

/// Number of query tokens that matched in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    /// Tokens found verbatim in the item's token set
    pub exact: usize,
    /// Tokens matched through a synonym group
    pub synonym: usize,
    /// Tokens within edit distance of an item token
    pub fuzzy: usize,
    /// Tokens found inside the item's display text
    pub substring: usize,
}

impl MatchCounts {
    fn record(&mut self, kind: MatchKind) {
        match kind {
            MatchKind::Exact => self.exact += 1,
            MatchKind::Synonym => self.synonym += 1,
            MatchKind::Fuzzy => self.fuzzy += 1,
            MatchKind::Substring => self.substring += 1,
        }
    }
}

/// A scored item. Lives only as long as one search call.
#[derive(Debug, Clone)]
pub struct MatchResult<'a, T> {
    /// The matched item
    pub item: &'a T,
    /// Total score (higher is better)
    pub score: f64,
    /// Per-category token counts
    pub counts: MatchCounts,
}

/// How one query token matched one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMatch {
    /// Query token as searched, after normalization
    pub token: String,
    /// Strategy that matched it
    pub kind: MatchKind,
    /// Points the token contributed
    pub points: f64,
}

/// A query after normalization, transliteration and synonym expansion.
#[derive(Debug, Clone, Default)]
pub struct PreparedQuery {
    normalized: String,
    tokens: TokenSet,
}

impl PreparedQuery {
    /// Normalized query text.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Expanded query tokens.
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// True when the query had no searchable content.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn has_code(&self, code: &str) -> bool {
        !code.is_empty() && (self.tokens.contains(code) || self.normalized.contains(code))
    }
}

/// Scores and ranks items against free-text queries.
#[derive(Debug, Clone)]
pub struct Matcher<'s> {
    synonyms: &'s SynonymTable,
    config: ScoringConfig,
    strategies: Vec<MatchKind>,
}

impl Default for Matcher<'static> {
    fn default() -> Self {
        Self::new(SynonymTable::shared(), ScoringConfig::default())
    }
}

impl<'s> Matcher<'s> {
    /// Create a matcher over a synonym table with the default strategy order.
    pub fn new(synonyms: &'s SynonymTable, config: ScoringConfig) -> Self {
        Self {
            synonyms,
            config,
            strategies: DEFAULT_STRATEGIES.to_vec(),
        }
    }

    /// Replace the strategy list. Order is precedence.
    #[must_use]
    pub fn with_strategies(mut self, strategies: impl Into<Vec<MatchKind>>) -> Self {
        self.strategies = strategies.into();
        self
    }

    /// Scoring configuration in use.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Normalize, transliterate and expand a raw query.
    pub fn prepare(&self, query: &str) -> PreparedQuery {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return PreparedQuery::default();
        }

        let tokens = self.synonyms.expand_tokens(&build_token_variants(&normalized));
        PreparedQuery { normalized, tokens }
    }

    fn strategy_matches(&self, kind: MatchKind, token: &str, index: &SearchIndex) -> bool {
        match kind {
            MatchKind::Exact => index.tokens().contains(token),
            MatchKind::Synonym => index
                .tokens()
                .iter()
                .any(|candidate| self.synonyms.are_synonyms(token, candidate)),
            MatchKind::Fuzzy => index
                .tokens()
                .iter()
                .any(|candidate| self.config.fuzzy.is_match(token, candidate)),
            MatchKind::Substring => index.text().contains(token),
        }
    }

    fn classify(&self, token: &str, index: &SearchIndex) -> Option<MatchKind> {
        self.strategies
            .iter()
            .copied()
            .find(|&kind| self.strategy_matches(kind, token, index))
    }

    fn points(&self, token: &str, kind: MatchKind) -> f64 {
        token.chars().count() as f64 * self.config.weight(kind)
    }

    fn code_bonus(&self, query: &PreparedQuery, index: &SearchIndex) -> f64 {
        let mut bonus = 0.0;
        if query.has_code(index.primary_code()) {
            bonus += self.config.primary_code_bonus;
        }
        if query.has_code(index.secondary_code()) {
            bonus += self.config.secondary_code_bonus;
        }
        bonus
    }

    /// Score one item. The score may be zero.
    pub fn score<'a, T: Searchable>(&self, query: &PreparedQuery, item: &'a T) -> MatchResult<'a, T> {
        let index = item.search_index();
        let mut score = 0.0;
        let mut counts = MatchCounts::default();

        for token in query.tokens() {
            if let Some(kind) = self.classify(token, index) {
                score += self.points(token, kind);
                counts.record(kind);
            }
        }
        score += self.code_bonus(query, index);

        MatchResult { item, score, counts }
    }

    /// Per-token breakdown of how a query matched an item.
    pub fn explain<T: Searchable>(&self, query: &str, item: &T) -> Vec<TokenMatch> {
        let prepared = self.prepare(query);
        let index = item.search_index();

        prepared
            .tokens()
            .iter()
            .filter_map(|token| {
                self.classify(token, index).map(|kind| TokenMatch {
                    token: token.clone(),
                    kind,
                    points: self.points(token, kind),
                })
            })
            .collect()
    }

    /// Score, filter and order items for a query.
    ///
    /// Items scoring zero or less are dropped. Order is by score, then by
    /// exact, synonym and substring counts, all descending; remaining ties
    /// keep catalog order. `limit` of `Some(n)` with `n > 0` truncates.
    pub fn rank<'a, T>(&self, query: &str, catalog: &'a [T], limit: Option<usize>) -> Vec<MatchResult<'a, T>>
    where
        T: Searchable + Sync,
    {
        let prepared = self.prepare(query);
        if prepared.is_empty() {
            return Vec::new();
        }

        let keep = |item: &'a T| {
            let result = self.score(&prepared, item);
            (result.score > 0.0).then_some(result)
        };

        #[cfg(feature = "parallel")]
        let mut results: Vec<MatchResult<'a, T>> = catalog.par_iter().filter_map(keep).collect();
        #[cfg(not(feature = "parallel"))]
        let mut results: Vec<MatchResult<'a, T>> = catalog.iter().filter_map(keep).collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.counts.exact.cmp(&a.counts.exact))
                .then_with(|| b.counts.synonym.cmp(&a.counts.synonym))
                .then_with(|| b.counts.substring.cmp(&a.counts.substring))
        });

        if let Some(limit) = limit.filter(|&n| n > 0) {
            results.truncate(limit);
        }

        results
    }

    /// Ranked items for a query. See [`Matcher::rank`].
    pub fn find_matches<'a, T>(&self, query: &str, catalog: &'a [T], limit: Option<usize>) -> Vec<&'a T>
    where
        T: Searchable + Sync,
    {
        self.rank(query, catalog, limit)
            .into_iter()
            .map(|result| result.item)
            .collect()
    }
}

/// Ranked items for a query using the built-in synonyms and default weights.
///
/// # Example
///
/// ```
/// use partmatch_search::{find_matches, SearchFields, SearchIndex};
///
/// let catalog = vec![
///     SearchIndex::new(SearchFields { name: "Prius бампер", primary_code: "TOK123", ..Default::default() }),
///     SearchIndex::new(SearchFields { name: "Harrier headlight", ..Default::default() }),
/// ];
///
/// let matches = find_matches("p20 gpr", &catalog, None);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].primary_code(), "tok123");
/// ```
pub fn find_matches<'a, T>(query: &str, catalog: &'a [T], limit: Option<usize>) -> Vec<&'a T>
where
    T: Searchable + Sync,
{
    Matcher::default().find_matches(query, catalog, limit)
}
