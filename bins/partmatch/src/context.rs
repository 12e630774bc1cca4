//! Shared command state: configuration, catalog cache and matcher.

use anyhow::Result;
use partmatch_catalog::{CatalogCache, CatalogItem, DataSource, DataSourceError, FileSource, RawRow, SheetSource};
use partmatch_core::config::{Config, SearchSettings};
use partmatch_search::{FuzzyConfig, Matcher, ScoringConfig, SynonymTable};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Catalog backend selected on the command line.
pub enum CatalogSource {
    Sheet(SheetSource),
    File(FileSource),
}

impl DataSource for CatalogSource {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, DataSourceError> {
        match self {
            Self::Sheet(source) => source.fetch_rows().await,
            Self::File(source) => source.fetch_rows().await,
        }
    }

    fn location(&self) -> &str {
        match self {
            Self::Sheet(source) => source.location(),
            Self::File(source) => source.location(),
        }
    }
}

pub struct Context {
    pub config: Config,
    pub cache: CatalogCache<CatalogSource>,
}

impl Context {
    /// Load configuration and pick the catalog source.
    ///
    /// A `--file` path wins over the configured sheet URL.
    pub fn new(config_path: Option<&Path>, file: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        if let Some(path) = &config.path {
            debug!(path = %path.display(), "Loaded configuration");
        }

        let source = match file {
            Some(path) => CatalogSource::File(FileSource::new(path)),
            None => CatalogSource::Sheet(
                SheetSource::from_config(&config).map_err(partmatch_core::Error::from)?,
            ),
        };

        let cache = CatalogCache::new(source)
            .with_ttl(config.schema.cache.ttl())
            .with_fetch_timeout(Duration::from_secs(config.schema.source.timeout_secs));

        Ok(Self { config, cache })
    }

    /// Current catalog, with catalog errors mapped to coded errors.
    pub async fn catalog(&self, force_refresh: bool) -> Result<Arc<Vec<CatalogItem>>> {
        let items = self
            .cache
            .get_catalog(force_refresh)
            .await
            .map_err(partmatch_core::Error::from)?;
        Ok(items)
    }

    /// Matcher using the built-in synonyms and configured weights.
    pub fn matcher(&self) -> Matcher<'static> {
        Matcher::new(SynonymTable::shared(), scoring_config(&self.config.schema.search))
    }
}

fn scoring_config(settings: &SearchSettings) -> ScoringConfig {
    ScoringConfig {
        exact_weight: settings.exact_weight,
        synonym_weight: settings.synonym_weight,
        fuzzy_weight: settings.fuzzy_weight,
        substring_weight: settings.substring_weight,
        primary_code_bonus: settings.primary_code_bonus,
        secondary_code_bonus: settings.secondary_code_bonus,
        fuzzy: FuzzyConfig {
            max_edit_distance: settings.max_edit_distance,
            min_token_len: settings.min_fuzzy_token_len,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_default_scoring() {
        assert_eq!(scoring_config(&SearchSettings::default()), ScoringConfig::default());
    }
}
