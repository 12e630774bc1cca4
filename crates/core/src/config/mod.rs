//! Configuration loading and schema definitions

mod loader;
mod schema;

pub use loader::{Config, ENV_CACHE_MS, ENV_SHEET_URL, ENV_TIMEOUT_SECS};
pub use schema::*;
