use crate::errors::Result;
use crate::fetchers::base::PriceFetcher;
use crate::models::panel::{FetchRange, MarketData};
use crate::models::symbol::Symbol;
use log::{debug, info};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Cache key: hash of the symbol set plus the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    symbols_hash: u64,
    range: FetchRange,
}

impl CacheKey {
    /// Order and duplicates in `symbols` do not change the key.
    pub fn new(symbols: &[Symbol], range: &FetchRange) -> Self {
        let set: BTreeSet<&Symbol> = symbols.iter().collect();
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);

        Self {
            symbols_hash: hasher.finish(),
            range: *range,
        }
    }
}

struct CacheEntry {
    data: Arc<MarketData>,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() >= ttl
    }
}

/// Memoizes fetch results for a bounded time. Failed fetches are not stored.
pub struct MarketDataProvider {
    fetcher: Arc<dyn PriceFetcher + Send + Sync>,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl MarketDataProvider {
    pub fn new(fetcher: Arc<dyn PriceFetcher + Send + Sync>, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached market data for `symbols` over `range`, fetching on a miss or
    /// after the entry expired.
    pub async fn load(&self, symbols: &[Symbol], range: &FetchRange) -> Result<Arc<MarketData>> {
        let key = CacheKey::new(symbols, range);

        if let Some(data) = self.cached(&key) {
            debug!("Cache hit for {} symbols ({} to {})", symbols.len(), range.start, range.end);
            return Ok(data);
        }

        info!(
            "Cache miss, fetching {} symbols from {}",
            symbols.len(),
            self.fetcher.provider_name()
        );
        let data = Arc::new(self.fetcher.fetch(symbols, range).await?);

        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        if entries.len() < before {
            debug!("Evicted {} expired fetch results", before - entries.len());
        }
        entries.insert(
            key,
            CacheEntry {
                data: Arc::clone(&data),
                fetched_at: Instant::now(),
            },
        );

        Ok(data)
    }

    fn cached(&self, key: &CacheKey) -> Option<Arc<MarketData>> {
        let entries = self.entries();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| Arc::clone(&entry.data))
    }

    /// Forget every cached result.
    pub fn invalidate(&self) {
        let mut entries = self.entries();
        info!("Invalidating {} cached fetch results", entries.len());
        entries.clear();
    }

    /// Drop expired entries, returning how many were removed. `load` does
    /// this on every miss as well.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
