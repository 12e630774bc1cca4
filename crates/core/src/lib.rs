//! Core utilities for partmatch
//!
//! Shared functionality used by the catalog crate and the CLI:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides
//! - **Retry**: exponential backoff policy for flaky fetches
//!
//! # Example
//!
//! ```rust,no_run
//! use partmatch_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("cache TTL: {:?}", config.schema.cache.ttl());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
}
