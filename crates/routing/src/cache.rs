//! Request-level journey cache with single-flight coalescing. The cache is
//! best-effort throughout: any transport failure downgrades the request to a
//! direct compute and is never surfaced to the caller.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, warn};
use model::journey::Journey;
use model::Coordinates;
use tokio::sync::Mutex;

use crate::config::RoutingConfig;
use crate::error::{CacheError, SearchError};
use crate::strategy::Strategy;

/// How long a coalesced request polls for the lock holder's result before
/// falling through to its own compute.
const WAIT_BUDGET: Duration = Duration::from_secs(3);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Key for one (request, strategy) pair. Coordinates are quantized to six
/// decimals (≈ 0.1 m) so float noise does not fragment the cache.
pub fn cache_key(from: Coordinates, to: Coordinates, strategy: Strategy) -> String {
    format!(
        "route:{:.6}:{:.6}:{:.6}:{:.6}:{}",
        from.latitude,
        from.longitude,
        to.latitude,
        to.longitude,
        strategy.name()
    )
}

/// The companion lock key of a value key.
pub fn lock_key(key: &str) -> String {
    format!("lock:{key}")
}

/// Storage surface of the journey cache. The engine reads and writes only
/// its own serialization; values are opaque to every other consumer.
#[async_trait]
pub trait JourneyCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;

    /// Stores the value only if the key is absent. Returns whether the
    /// write happened.
    async fn set_nx(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, CacheError>;

    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// Runs the cache+single-flight pipeline around a compute:
/// hit → return; lock acquired → compute, publish, unlock; lock held by
/// someone else → poll for their result, then fall through to a duplicate
/// compute rather than stalling.
pub async fn get_or_compute<C, F, Fut>(
    cache: &C,
    key: &str,
    config: &RoutingConfig,
    compute: F,
) -> Result<Journey, SearchError>
where
    C: JourneyCache + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Journey, SearchError>>,
{
    match cache.get(key).await {
        Ok(Some(serialized)) => match serde_json::from_str(&serialized) {
            Ok(journey) => return Ok(journey),
            Err(why) => warn!("discarding undecodable cache value for {key}: {why}"),
        },
        Ok(None) => {}
        Err(why) => {
            // cache down: compute directly, skip coalescing and writes
            warn!("cache get failed for {key}: {why}");
            return compute().await;
        }
    }

    let lock = lock_key(key);
    match cache.set_nx(&lock, "1", config.cache_mutex_ttl).await {
        Ok(true) => {
            let journey = compute().await?;
            publish(cache, key, &journey, config.cache_ttl).await;
            // held lock is only released after a successful compute; on
            // failure it expires on its own
            if let Err(why) = cache.del(&lock).await {
                warn!("cache unlock failed for {key}: {why}");
            }
            Ok(journey)
        }
        Ok(false) => {
            // someone else is computing; poll for their result
            let poll_deadline = Instant::now() + WAIT_BUDGET;
            while Instant::now() < poll_deadline {
                tokio::time::sleep(POLL_INTERVAL).await;
                match cache.get(key).await {
                    Ok(Some(serialized)) => {
                        if let Ok(journey) = serde_json::from_str(&serialized) {
                            return Ok(journey);
                        }
                    }
                    Ok(None) => {}
                    Err(_) => break,
                }
            }
            debug!("single-flight wait expired for {key}, computing anyway");
            let journey = compute().await?;
            publish(cache, key, &journey, config.cache_ttl).await;
            Ok(journey)
        }
        Err(why) => {
            warn!("cache lock failed for {key}: {why}");
            compute().await
        }
    }
}

async fn publish<C: JourneyCache + ?Sized>(
    cache: &C,
    key: &str,
    journey: &Journey,
    ttl: Duration,
) {
    match serde_json::to_string(journey) {
        Ok(serialized) => {
            if let Err(why) = cache.set(key, &serialized, ttl).await {
                warn!("cache set failed for {key}: {why}");
            }
        }
        Err(why) => warn!("journey serialization failed for {key}: {why}"),
    }
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// In-process cache backend behind the same trait a remote key-value store
/// would implement. Expiry is checked lazily on access.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JourneyCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.entries.lock().await.insert(
            key.to_owned(),
            CacheEntry {
                value: value.to_owned(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn set_nx(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, CacheError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(false),
            _ => {
                entries.insert(
                    key.to_owned(),
                    CacheEntry {
                        value: value.to_owned(),
                        expires_at: Instant::now() + ttl,
                    },
                );
                Ok(true)
            }
        }
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_quantize_to_six_decimals() {
        let a = cache_key(
            Coordinates::new(14.716712345, -17.467754321),
            Coordinates::new(14.75, -17.5),
            Strategy::Fast,
        );
        let b = cache_key(
            Coordinates::new(14.7167123454, -17.4677543214),
            Coordinates::new(14.75, -17.5),
            Strategy::Fast,
        );
        assert_eq!(a, b);
        assert_eq!(a, "route:14.716712:-17.467754:14.750000:-17.500000:fast");
    }

    #[test]
    fn different_strategies_get_different_keys() {
        let from = Coordinates::new(0.0, 0.0);
        let to = Coordinates::new(1.0, 1.0);
        assert_ne!(
            cache_key(from, to, Strategy::Fast),
            cache_key(from, to, Strategy::Simple)
        );
    }

    #[test]
    fn lock_key_is_prefixed() {
        assert_eq!(lock_key("route:a"), "lock:route:a");
    }

    #[tokio::test]
    async fn memory_cache_round_trip() {
        let cache = MemoryCache::new();
        cache
            .set("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_owned()));
        cache.del("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_nx_respects_live_entries_only() {
        let cache = MemoryCache::new();
        assert!(cache
            .set_nx("k", "first", Duration::from_secs(60))
            .await
            .unwrap());
        assert!(!cache
            .set_nx("k", "second", Duration::from_secs(60))
            .await
            .unwrap());
        cache.del("k").await.unwrap();
        assert!(cache
            .set_nx("k", "third", Duration::from_secs(60))
            .await
            .unwrap());
    }
}
