use std::{collections::HashMap, time::Duration};

use tokio::sync::RwLock;
use tokio::time::Instant;

use interface::Quote;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub quote: Quote,
    pub fetched_at: Instant,
}

/// Time-bounded quote cache keyed by symbol.
///
/// Stale entries are never removed, only overwritten by the next successful
/// fetch, so `size` only grows.
pub struct QuoteCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Entry for `symbol` regardless of freshness.
    pub async fn get(&self, symbol: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(symbol).cloned()
    }

    pub fn is_valid(&self, fetched_at: Instant) -> bool {
        fetched_at.elapsed() < self.ttl
    }

    pub async fn put(&self, symbol: &str, quote: Quote) {
        let entry = CacheEntry {
            quote,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(symbol.to_string(), entry);
    }

    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            currency: "INR".to_string(),
            price,
            previous_close: price,
            change: 0.0,
            change_ratio: 0.0,
            market_time: 0,
            short_name: symbol.to_string(),
            long_name: symbol.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = QuoteCache::default();
        assert!(cache.get("TCS.NS").await.is_none());
        assert_eq!(cache.size().await, 0);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = QuoteCache::default();
        cache.put("TCS.NS", quote("TCS.NS", 1.0)).await;
        cache.put("TCS.NS", quote("TCS.NS", 2.0)).await;
        cache.put("INFY.NS", quote("INFY.NS", 3.0)).await;

        assert_eq!(cache.size().await, 2);
        let entry = cache.get("TCS.NS").await.unwrap();
        assert_eq!(entry.quote.price, 2.0);
    }

    #[tokio::test]
    async fn test_symbols_are_case_sensitive() {
        let cache = QuoteCache::default();
        cache.put("abc", quote("abc", 1.0)).await;
        assert!(cache.get("ABC").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_ttl() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.put("TCS.NS", quote("TCS.NS", 1.0)).await;
        let entry = cache.get("TCS.NS").await.unwrap();
        assert!(cache.is_valid(entry.fetched_at));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.is_valid(entry.fetched_at));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.is_valid(entry.fetched_at));

        // stale entries stay put
        assert!(cache.get("TCS.NS").await.is_some());
        assert_eq!(cache.size().await, 1);
    }
}
