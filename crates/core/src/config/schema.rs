//! Configuration schema definitions
//!
//! Every section has serde defaults, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Where the catalog comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Published spreadsheet CSV URL
    #[serde(default)]
    pub url: Option<String>,

    /// Per-fetch timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// Catalog cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Snapshot lifetime in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

impl CacheConfig {
    /// Snapshot lifetime
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

fn default_ttl_ms() -> u64 {
    5 * 60 * 1000
}

/// Ranking knobs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSettings {
    /// Results shown when no limit is given
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    #[serde(default = "default_min_fuzzy_token_len")]
    pub min_fuzzy_token_len: usize,

    #[serde(default = "default_exact_weight")]
    pub exact_weight: f64,

    #[serde(default = "default_synonym_weight")]
    pub synonym_weight: f64,

    #[serde(default = "default_fuzzy_weight")]
    pub fuzzy_weight: f64,

    #[serde(default = "default_substring_weight")]
    pub substring_weight: f64,

    /// Bonus when the query contains an item's TOK code
    #[serde(default = "default_primary_code_bonus")]
    pub primary_code_bonus: f64,

    /// Bonus when the query contains an item's OEM code
    #[serde(default = "default_secondary_code_bonus")]
    pub secondary_code_bonus: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_edit_distance: default_max_edit_distance(),
            min_fuzzy_token_len: default_min_fuzzy_token_len(),
            exact_weight: default_exact_weight(),
            synonym_weight: default_synonym_weight(),
            fuzzy_weight: default_fuzzy_weight(),
            substring_weight: default_substring_weight(),
            primary_code_bonus: default_primary_code_bonus(),
            secondary_code_bonus: default_secondary_code_bonus(),
        }
    }
}

impl SearchSettings {
    /// All weights and bonuses, labelled, for validation messages.
    pub fn weights(&self) -> [(&'static str, f64); 6] {
        [
            ("exact_weight", self.exact_weight),
            ("synonym_weight", self.synonym_weight),
            ("fuzzy_weight", self.fuzzy_weight),
            ("substring_weight", self.substring_weight),
            ("primary_code_bonus", self.primary_code_bonus),
            ("secondary_code_bonus", self.secondary_code_bonus),
        ]
    }
}

fn default_limit() -> usize {
    10
}

fn default_max_edit_distance() -> usize {
    3
}

fn default_min_fuzzy_token_len() -> usize {
    3
}

fn default_exact_weight() -> f64 {
    2.0
}

fn default_synonym_weight() -> f64 {
    1.8
}

fn default_fuzzy_weight() -> f64 {
    1.0
}

fn default_substring_weight() -> f64 {
    0.8
}

fn default_primary_code_bonus() -> f64 {
    25.0
}

fn default_secondary_code_bonus() -> f64 {
    15.0
}

/// Catalog completeness check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Number of products the sheet is expected to hold
    #[serde(default = "default_expected_count")]
    pub expected_count: Option<usize>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_count: default_expected_count(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_expected_count() -> Option<usize> {
    Some(226)
}
