//! In-memory catalog snapshot with TTL.
//!
//! Readers clone an `Arc` of the current snapshot and never wait on a
//! running fetch. Refreshes are serialized: callers that queued behind a
//! refresh get its result instead of fetching again.

use crate::error::{CatalogResult, DataSourceError};
use crate::item::CatalogItem;
use crate::source::DataSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default snapshot lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default limit on a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
struct Snapshot {
    items: Arc<Vec<CatalogItem>>,
    fetched_at: Instant,
    expires_at: Instant,
    generation: u64,
}

impl Snapshot {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Point-in-time view of the cache, for health reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    /// Items in the current snapshot
    pub item_count: usize,
    /// Number of successful refreshes so far
    pub generation: u64,
    /// Time since the snapshot was fetched
    pub age: Option<Duration>,
    /// Time until the snapshot expires; zero once expired
    pub expires_in: Option<Duration>,
    /// Configured lifetime
    pub ttl: Duration,
}

impl CacheStatus {
    /// Whether a snapshot exists and has not expired.
    pub fn is_fresh(&self) -> bool {
        self.expires_in.is_some_and(|d| !d.is_zero())
    }
}

/// Catalog cache over a [`DataSource`].
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    fetch_timeout: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    refresh: Mutex<()>,
}

impl<S: DataSource> CatalogCache<S> {
    /// Create an empty cache with default TTL and fetch timeout.
    pub fn new(source: S) -> Self {
        Self {
            source,
            ttl: DEFAULT_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            snapshot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Set the snapshot lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the limit on a single fetch.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current catalog, fetching when empty, expired or forced.
    ///
    /// On failure the previous snapshot is kept untouched and the error
    /// is returned.
    pub async fn get_catalog(&self, force_refresh: bool) -> CatalogResult<Arc<Vec<CatalogItem>>> {
        let seen_generation = {
            let snapshot = self.snapshot.read().await;
            if let Some(current) = snapshot.as_ref() {
                if !force_refresh && current.is_fresh(Instant::now()) {
                    return Ok(Arc::clone(&current.items));
                }
            }
            snapshot.as_ref().map_or(0, |s| s.generation)
        };

        let _guard = self.refresh.lock().await;

        // Someone refreshed while we waited for the lock.
        if let Some(current) = self.snapshot.read().await.as_ref() {
            if current.generation != seen_generation {
                debug!(generation = current.generation, "Using snapshot from concurrent refresh");
                return Ok(Arc::clone(&current.items));
            }
        }

        let items = Arc::new(self.fetch_items().await?);

        let now = Instant::now();
        let mut snapshot = self.snapshot.write().await;
        let generation = seen_generation + 1;
        *snapshot = Some(Snapshot {
            items: Arc::clone(&items),
            fetched_at: now,
            expires_at: now + self.ttl,
            generation,
        });

        info!(
            source = %self.source.location(),
            items = items.len(),
            generation,
            ttl = ?self.ttl,
            "Catalog refreshed"
        );

        Ok(items)
    }

    /// Snapshot metadata without fetching.
    pub async fn status(&self) -> CacheStatus {
        let now = Instant::now();
        let snapshot = self.snapshot.read().await;

        match snapshot.as_ref() {
            Some(current) => CacheStatus {
                item_count: current.items.len(),
                generation: current.generation,
                age: Some(now.saturating_duration_since(current.fetched_at)),
                expires_in: Some(current.expires_at.saturating_duration_since(now)),
                ttl: self.ttl,
            },
            None => CacheStatus {
                item_count: 0,
                generation: 0,
                age: None,
                expires_in: None,
                ttl: self.ttl,
            },
        }
    }

    async fn fetch_items(&self) -> Result<Vec<CatalogItem>, DataSourceError> {
        let start = Instant::now();
        let rows = match tokio::time::timeout(self.fetch_timeout, self.source.fetch_rows()).await {
            Ok(result) => result,
            Err(_) => Err(DataSourceError::Timeout(self.fetch_timeout)),
        }
        .inspect_err(|e| {
            warn!(source = %self.source.location(), error = %e, "Catalog fetch failed");
        })?;

        let row_count = rows.len();
        let items: Vec<CatalogItem> = rows
            .iter()
            .map(CatalogItem::from_row)
            .filter(CatalogItem::has_identity)
            .collect();

        debug!(
            rows = row_count,
            kept = items.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Catalog rows mapped"
        );

        Ok(items)
    }
}
