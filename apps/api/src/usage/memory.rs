use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::usage::UsageStore;

/// Keys are swept for stale timestamps once the map grows past this size.
const SWEEP_THRESHOLD: usize = 1024;

/// Sliding-window counters kept in process memory. Suitable for a single
/// instance; counts are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    hits: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_at(&self, key: &str, window: Duration, now: DateTime<Utc>) -> Result<u64, AppError> {
        let window = chrono::Duration::from_std(window)
            .map_err(|e| AppError::Usage(format!("invalid usage window: {e}")))?;
        let cutoff = now - window;

        let mut hits = self
            .hits
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("usage store lock poisoned")))?;

        if hits.len() > SWEEP_THRESHOLD {
            hits.retain(|_, stamps| {
                evict_before(stamps, cutoff);
                !stamps.is_empty()
            });
        }

        let stamps = hits.entry(key.to_string()).or_default();
        evict_before(stamps, cutoff);
        stamps.push_back(now);
        Ok(stamps.len() as u64)
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.hits.lock().map(|h| h.len()).unwrap_or_default()
    }
}

fn evict_before(stamps: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while stamps.front().is_some_and(|t| *t <= cutoff) {
        stamps.pop_front();
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn record(&self, key: &str, window: Duration) -> Result<u64, AppError> {
        self.record_at(key, window, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_counts_within_window() {
        let store = InMemoryUsageStore::new();
        assert_eq!(store.record_at("k", WINDOW, at(0)).unwrap(), 1);
        assert_eq!(store.record_at("k", WINDOW, at(10)).unwrap(), 2);
        assert_eq!(store.record_at("k", WINDOW, at(59)).unwrap(), 3);
    }

    #[test]
    fn test_old_hits_are_evicted() {
        let store = InMemoryUsageStore::new();
        store.record_at("k", WINDOW, at(0)).unwrap();
        store.record_at("k", WINDOW, at(30)).unwrap();
        // the hit at t=0 falls out of the window
        assert_eq!(store.record_at("k", WINDOW, at(60)).unwrap(), 2);
        assert_eq!(store.record_at("k", WINDOW, at(200)).unwrap(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryUsageStore::new();
        store.record_at("a", WINDOW, at(0)).unwrap();
        assert_eq!(store.record_at("b", WINDOW, at(0)).unwrap(), 1);
    }

    #[test]
    fn test_sweep_drops_idle_keys() {
        let store = InMemoryUsageStore::new();
        for i in 0..=SWEEP_THRESHOLD {
            store.record_at(&format!("user-{i}"), WINDOW, at(0)).unwrap();
        }
        assert_eq!(store.tracked_keys(), SWEEP_THRESHOLD + 1);
        store.record_at("late", WINDOW, at(3600)).unwrap();
        assert_eq!(store.tracked_keys(), 1);
    }

    #[tokio::test]
    async fn test_trait_record() {
        let store = InMemoryUsageStore::new();
        assert_eq!(store.record("k", WINDOW).await.unwrap(), 1);
        assert_eq!(store.record("k", WINDOW).await.unwrap(), 2);
    }
}
