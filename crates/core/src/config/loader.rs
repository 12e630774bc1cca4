//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the published sheet URL.
pub const ENV_SHEET_URL: &str = "GOOGLE_SHEET_URL";
/// Environment variable holding the cache TTL in milliseconds.
pub const ENV_CACHE_MS: &str = "PRODUCT_CACHE_MS";
/// Environment variable holding the fetch timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PARTMATCH_TIMEOUT_SECS";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults, then apply
    /// environment overrides and validate.
    ///
    /// An explicit path must exist; discovered paths are optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override file values from the environment.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SHEET_URL).filter(|v| !v.trim().is_empty()) {
            self.schema.source.url = Some(url.trim().to_string());
        }

        // Zero or unparseable values leave the configured TTL in place.
        if let Some(ms) = lookup(ENV_CACHE_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
        {
            self.schema.cache.ttl_ms = ms;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.schema.source.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::new(
                    ErrorCode::ConfigValidationError,
                    format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"),
                )
            })?;
        }

        Ok(())
    }

    /// Reject values the rest of the system cannot work with.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.schema.source.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::new(
                    ErrorCode::ConfigValidationError,
                    format!("Source URL must use http or https: {url}"),
                ));
            }
        }

        if self.schema.source.timeout_secs == 0 {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                "source.timeout_secs must be greater than zero",
            ));
        }

        for (name, value) in self.schema.search.weights() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::new(
                    ErrorCode::ConfigValidationError,
                    format!("search.{name} must be a non-negative number, got {value}"),
                ));
            }
        }

        Ok(())
    }

    /// Configured sheet URL, or a configuration error naming the variable.
    pub fn sheet_url(&self) -> Result<&str> {
        self.schema
            .source
            .url
            .as_deref()
            .ok_or_else(|| Error::missing_endpoint(ENV_SHEET_URL))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = ["partmatch.toml", ".partmatch.toml"];

    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("partmatch").join("partmatch.toml"))
        .filter(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::from(e).with_context(format!("Failed to read config file {}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("Failed to parse config file {}", path.display()))
    })
}
