//! The index cache: per-channel snapshots with periodic refresh.
//!
//! The shared mutable state is exactly the channel → snapshot map. Refresh
//! passes do all network work outside the lock and take the write lock only
//! for the instant of publishing a new `Arc<Snapshot>`; readers take the
//! read lock only to clone the `Arc` out. A `tokio::sync::Mutex` gate
//! serializes refresh passes so a manual trigger can never overlap the
//! background timer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::MissedTickBehavior;

use silo_core::{SearchResult, SearchResults, Snapshot, CHANNELS};

use crate::catalog::parse_catalog;
use crate::error::IndexError;
use crate::fetch::TextFetcher;
use crate::resolve::{PackageResolver, Resolution};

/// Default interval between background refresh passes.
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Channel-indexed metadata cache.
///
/// Constructed once at startup and shared behind an `Arc` between the HTTP
/// front end (readers) and the background refresh task (single writer).
pub struct IndexCache {
    snapshots: RwLock<HashMap<String, Arc<Snapshot>>>,
    fetcher: Arc<dyn TextFetcher>,
    resolver: PackageResolver,
    refresh_gate: tokio::sync::Mutex<()>,
    refresh_interval: Duration,
}

impl IndexCache {
    /// Create a cache over the given fetcher and upstream layout.
    pub fn new(fetcher: Arc<dyn TextFetcher>, base_url: &str, arch: &str) -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
            fetcher,
            resolver: PackageResolver::new(base_url, arch),
            refresh_gate: tokio::sync::Mutex::new(()),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Override the background refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Re-resolve every channel in fixed order.
    ///
    /// A channel whose catalog is absent or malformed keeps its previous
    /// snapshot and the pass continues; a transport failure aborts the
    /// remaining channels and is returned to the caller.
    pub async fn refresh(&self) -> Result<(), IndexError> {
        let _gate = self.refresh_gate.lock().await;
        tracing::info!("refreshing index cache");

        for channel in CHANNELS {
            self.refresh_channel(channel).await?;
        }

        tracing::info!("index cache refresh finished");
        Ok(())
    }

    async fn refresh_channel(&self, channel: &str) -> Result<(), IndexError> {
        let catalog_url = self.resolver.catalog_url(channel);
        let resp = self.fetcher.get(&catalog_url).await?;
        if !resp.is_success() {
            // Keep whatever was published before; one bad channel round
            // must not wipe good data.
            tracing::warn!(channel, status = resp.status, "catalog not available");
            return Ok(());
        }

        let stubs = match parse_catalog(channel, &resp.body) {
            Ok(stubs) => stubs,
            Err(e) => {
                tracing::warn!(channel, "skipping channel: {e}");
                return Ok(());
            }
        };

        let mut packages = HashMap::with_capacity(stubs.len());
        for stub in &stubs {
            match self.resolver.resolve(self.fetcher.as_ref(), channel, stub).await? {
                Resolution::Resolved(pkg) => {
                    tracing::debug!(channel, package = %pkg.name, version = %pkg.version, "resolved");
                    packages.insert(pkg.name.clone(), pkg);
                }
                Resolution::NotPublished => {
                    tracing::info!(channel, package = %stub.name, "not published on channel");
                }
                Resolution::Malformed(reason) => {
                    // A broken stable release is operationally significant;
                    // elsewhere it is routine churn.
                    if channel == "stable" {
                        tracing::warn!(channel, package = %stub.name, "excluded: {reason}");
                    } else {
                        tracing::info!(channel, package = %stub.name, "excluded: {reason}");
                    }
                }
            }
        }

        let snapshot = Arc::new(Snapshot::new(packages));
        tracing::info!(channel, packages = snapshot.len(), "published snapshot");
        self.snapshots
            .write()
            .insert(channel.to_string(), snapshot);
        Ok(())
    }

    /// The latest published snapshot for `channel`, if any refresh has ever
    /// succeeded for it.
    pub fn read(&self, channel: &str) -> Option<Arc<Snapshot>> {
        self.snapshots.read().get(channel).cloned()
    }

    /// Query a channel's snapshot.
    ///
    /// `"*"` and `""` match every package; any other query matches by
    /// exact name. An unknown channel yields empty results after a logged
    /// warning, not an error.
    pub fn find(&self, channel: &str, query: &str) -> SearchResults {
        let Some(snapshot) = self.read(channel) else {
            tracing::warn!(channel, "no snapshot for channel");
            return SearchResults::default();
        };

        let mut results: Vec<SearchResult> = snapshot
            .packages
            .values()
            .filter(|pkg| query == "*" || query.is_empty() || query == pkg.name)
            .cloned()
            .map(SearchResult::from_package)
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));

        SearchResults {
            results,
            error_list: Vec::new(),
        }
    }

    /// Run one refresh synchronously, then keep refreshing on a fixed
    /// interval for the lifetime of the process.
    ///
    /// The initial refresh error propagates (typically fatal to process
    /// start); background refresh errors are logged and never stop the
    /// timer. A pass that overruns the interval delays the next tick
    /// rather than overlapping it.
    pub async fn start(self: &Arc<Self>) -> Result<(), IndexError> {
        self.refresh().await?;

        let cache = Arc::clone(self);
        let period = self.refresh_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the startup refresh
            // already covered it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = cache.refresh().await {
                    tracing::error!("background refresh failed: {e}");
                }
            }
        });

        Ok(())
    }
}
