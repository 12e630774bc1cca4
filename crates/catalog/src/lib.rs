//! Auto-part catalog loading for partmatch
//!
//! Turns a published spreadsheet into searchable [`CatalogItem`]s and keeps
//! them in a TTL cache.
//!
//! # Features
//!
//! - **Row mapping**: Mongolian and English header aliases, price formatting
//! - **Data sources**: published Google Sheet CSV over HTTP, or a local file
//! - **Caching**: shared snapshot with TTL, forced refresh and in-flight dedup
//! - **Validation**: completeness report against an expected product count
//!
//! # Example
//!
//! ```rust,no_run
//! use partmatch_catalog::{CatalogCache, SheetSource};
//! use partmatch_search::find_matches;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SheetSource::new("https://docs.google.com/spreadsheets/d/e/.../pub?output=csv", Duration::from_secs(15))?;
//!     let cache = CatalogCache::new(source);
//!
//!     let catalog = cache.get_catalog(false).await?;
//!     for item in find_matches("prius бампер", &catalog, Some(5)) {
//!         println!("{} ({})", item.name, item.price_with_vat);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod csv;
pub mod error;
pub mod item;
pub mod price;
pub mod source;
pub mod validation;

pub use cache::{CacheStatus, CatalogCache};
pub use error::{CatalogError, CatalogResult, DataSourceError};
pub use item::{CatalogItem, CatalogItemBuilder, ProductSummary, RawRow};
pub use price::format_price;
pub use source::{DataSource, FileSource, SheetSource};
pub use validation::{MissingFields, ValidationReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cache::{CacheStatus, CatalogCache};
    pub use crate::error::{CatalogError, CatalogResult, DataSourceError};
    pub use crate::item::{CatalogItem, ProductSummary};
    pub use crate::source::{DataSource, FileSource, SheetSource};
    pub use crate::validation::ValidationReport;
}
