//! # Cached Product Resolver
//!
//! Memoizes catalog lookups in a bounded [`LruCache`].
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_cached_product(42)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock ─► cache.get(42) ─► unlock                                       │
//! │       │                                                                 │
//! │       ├── Some(Some(p)) → hit, return p                                │
//! │       ├── Some(None)    → hit, return None (absence is cached too)     │
//! │       │                                                                 │
//! │       └── None          → miss                                         │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │           catalog.get_product(42).await   (no lock held)               │
//! │                 │                                                       │
//! │                 ├── Err  → propagate, nothing cached                   │
//! │                 └── Ok(r)→ lock ─► cache.put(42, r) ─► unlock          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Staleness
//! Entries live until evicted or explicitly invalidated. A product that is
//! renamed, repriced or created after a cached miss is not seen until then.
//!
//! ## Concurrency
//! Two tasks missing on the same id at once both query the catalog and the
//! later insert wins. Recency order under contention is approximate.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::CoreResult;
use crate::lru::LruCache;
use crate::store::ProductCatalog;
use crate::types::Product;
use crate::DEFAULT_PRODUCT_CACHE_CAPACITY;

// =============================================================================
// Cache Statistics
// =============================================================================

/// Counters for cache behaviour.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that went through to the catalog.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Hit ratio in `0.0..=1.0`; zero before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

// =============================================================================
// Cached Catalog
// =============================================================================

/// A [`ProductCatalog`] wrapped with an LRU memo of its answers.
///
/// Owned by the accessor rather than living in a global, so every test
/// builds its own with whatever capacity it wants to observe.
pub struct CachedCatalog<C> {
    catalog: C,
    cache: Mutex<LruCache<i64, Option<Product>>>,
    stats: CacheStats,
}

impl<C: ProductCatalog> CachedCatalog<C> {
    /// Wraps `catalog` with the default capacity (1000 entries).
    pub fn new(catalog: C) -> Self {
        Self::with_capacity(catalog, DEFAULT_PRODUCT_CACHE_CAPACITY)
    }

    pub fn with_capacity(catalog: C, capacity: NonZeroUsize) -> Self {
        CachedCatalog {
            catalog,
            cache: Mutex::new(LruCache::new(capacity)),
            stats: CacheStats::default(),
        }
    }

    /// Resolves a product id, consulting the catalog only on a cache miss.
    ///
    /// ## Returns
    /// * `Ok(Some(product))` - Known product (possibly a cached copy)
    /// * `Ok(None)` - Catalog has no such product (possibly cached absence)
    /// * `Err(_)` - Catalog failed; the failure is not cached
    pub async fn get_cached_product(&self, product_id: i64) -> CoreResult<Option<Product>> {
        if let Some(cached) = self.lookup(product_id) {
            self.stats.record_hit();
            return Ok(cached);
        }

        self.stats.record_miss();
        let product = self.catalog.get_product(product_id).await?;
        self.remember(product_id, product.clone());

        Ok(product)
    }

    /// Forgets one id. Returns whether it was cached.
    pub fn invalidate(&self, product_id: i64) -> bool {
        self.cache.lock().remove(&product_id).is_some()
    }

    /// Forgets every cached answer.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.lock().capacity()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The wrapped catalog, for uncached access.
    pub fn inner(&self) -> &C {
        &self.catalog
    }

    fn lookup(&self, product_id: i64) -> Option<Option<Product>> {
        self.cache.lock().get(&product_id).cloned()
    }

    fn remember(&self, product_id: i64, product: Option<Product>) {
        let evicted = self.cache.lock().put(product_id, product);
        self.stats.record_insert();

        if let Some((evicted_id, _)) = evicted {
            self.stats.record_eviction();
            debug!(evicted_id, product_id, "Evicted product from cache");
        }
    }
}

#[async_trait]
impl<C: ProductCatalog> ProductCatalog for CachedCatalog<C> {
    async fn get_product(&self, product_id: i64) -> CoreResult<Option<Product>> {
        self.get_cached_product(product_id).await
    }
}

impl<C> std::fmt::Debug for CachedCatalog<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCatalog")
            .field("cache", &*self.cache.lock())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
