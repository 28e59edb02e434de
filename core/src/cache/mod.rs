//! Lookup result cache with single-flight builds.
//!
//! Interval construction for a fight is deterministic, so each
//! `(report, fight)` pair is built at most once per cache lifetime.
//! Concurrent requests for the same key coalesce onto one in-flight build;
//! everyone else waits on a watch channel and receives the shared result.
//!
//! ```text
//!   get_or_build(key) ──┬─ Ready       → clone the Arc, done
//!                       ├─ InFlight    → await the builder's broadcast
//!                       └─ vacant      → become the builder, broadcast
//! ```
//!
//! Failed builds are not cached: the slot is cleared so the next caller
//! retries.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use tokio::sync::{Mutex, watch};

use crate::lookup::BuffLookupData;
use crate::scope::ProviderError;

/// Identity of one fight's lookup within one report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub report_code: String,
    pub fight_id: i32,
}

impl LookupKey {
    pub fn new(report_code: impl Into<String>, fight_id: i32) -> Self {
        Self {
            report_code: report_code.into(),
            fight_id,
        }
    }
}

/// Why a lookup build failed.
///
/// Cloneable because one failure is broadcast to every coalesced waiter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("event provider failed: {0}")]
    Provider(String),
    #[error("lookup build task failed: {0}")]
    Task(String),
}

impl From<ProviderError> for BuildError {
    fn from(err: ProviderError) -> Self {
        BuildError::Provider(err.to_string())
    }
}

pub type BuildResult = Result<Arc<BuffLookupData>, BuildError>;

enum EntryState {
    /// Build in progress. The id distinguishes successive builds of the same
    /// key, so a waiter left over from an abandoned build cannot evict a
    /// newer one.
    InFlight {
        build_id: u64,
        rx: watch::Receiver<Option<BuildResult>>,
    },
    Ready(Arc<BuffLookupData>),
}

enum Role {
    Waiter {
        build_id: u64,
        rx: watch::Receiver<Option<BuildResult>>,
    },
    Builder(watch::Sender<Option<BuildResult>>),
}

/// Shared cache of built lookups, keyed by [`LookupKey`].
#[derive(Default)]
pub struct LookupCache {
    entries: Mutex<HashMap<LookupKey, EntryState>>,
    next_build_id: AtomicU64,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached lookup for `key`, building it with `build` if
    /// absent. Concurrent callers for the same key share a single build.
    pub async fn get_or_build<F, Fut>(&self, key: LookupKey, build: F) -> BuildResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = BuildResult>,
    {
        let role = {
            let mut entries = self.entries.lock().await;
            match entries.get(&key) {
                Some(EntryState::Ready(data)) => return Ok(Arc::clone(data)),
                Some(EntryState::InFlight { build_id, rx }) => Role::Waiter {
                    build_id: *build_id,
                    rx: rx.clone(),
                },
                None => {
                    let (tx, rx) = watch::channel(None);
                    let build_id = self.next_build_id.fetch_add(1, Ordering::Relaxed);
                    entries.insert(key.clone(), EntryState::InFlight { build_id, rx });
                    Role::Builder(tx)
                }
            }
        };

        match role {
            Role::Waiter { build_id, mut rx } => {
                // Clone the broadcast value out before doing anything else:
                // the watch guard must not be held across another await.
                let waited = match rx.wait_for(Option::is_some).await {
                    Ok(value) => (*value).clone(),
                    Err(_) => None,
                };
                match waited {
                    Some(result) => result,
                    None => {
                        // Builder dropped mid-build (cancelled or panicked).
                        // Clear the stale slot so the next caller can rebuild.
                        self.remove_in_flight(&key, build_id).await;
                        Err(BuildError::Task("build abandoned before completing".into()))
                    }
                }
            }
            Role::Builder(tx) => {
                let result = build().await;
                {
                    let mut entries = self.entries.lock().await;
                    match &result {
                        Ok(data) => {
                            entries.insert(key, EntryState::Ready(Arc::clone(data)));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "lookup build failed, slot cleared");
                            entries.remove(&key);
                        }
                    }
                }
                let _ = tx.send(Some(result.clone()));
                result
            }
        }
    }

    /// Drop every cached fight for a report. Called when the user switches
    /// reports or forces a reload.
    pub async fn invalidate_report(&self, report_code: &str) {
        let mut entries = self.entries.lock().await;
        entries.retain(|key, _| key.report_code != report_code);
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// True if the key holds a completed build.
    pub async fn contains(&self, key: &LookupKey) -> bool {
        matches!(self.entries.lock().await.get(key), Some(EntryState::Ready(_)))
    }

    async fn remove_in_flight(&self, key: &LookupKey, build_id: u64) {
        let mut entries = self.entries.lock().await;
        if let Some(EntryState::InFlight {
            build_id: current, ..
        }) = entries.get(key)
            && *current == build_id
        {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn empty_lookup() -> Arc<BuffLookupData> {
        Arc::new(BuffLookupData::default())
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_build() {
        let cache = Arc::new(LookupCache::new());
        let builds = Arc::new(AtomicUsize::new(0));
        let key = LookupKey::new("ABC123", 7);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let builds = Arc::clone(&builds);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_build(key, || async move {
                        builds.fetch_add(1, Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        Ok(empty_lookup())
                    })
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completed_build_is_reused() {
        let cache = LookupCache::new();
        let builds = AtomicUsize::new(0);
        let key = LookupKey::new("ABC123", 1);

        for _ in 0..3 {
            let result = cache
                .get_or_build(key.clone(), || async {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(empty_lookup())
                })
                .await;
            assert!(result.is_ok());
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&key).await);
    }

    #[tokio::test]
    async fn failed_build_clears_the_slot() {
        let cache = LookupCache::new();
        let key = LookupKey::new("ABC123", 1);

        let first = cache
            .get_or_build(key.clone(), || async {
                Err(BuildError::Provider("boom".into()))
            })
            .await;
        assert!(first.is_err());
        assert!(!cache.contains(&key).await);

        let second = cache
            .get_or_build(key.clone(), || async { Ok(empty_lookup()) })
            .await;
        assert!(second.is_ok());
        assert!(cache.contains(&key).await);
    }

    #[tokio::test]
    async fn invalidate_report_drops_only_that_report() {
        let cache = LookupCache::new();
        let keep = LookupKey::new("KEEP", 1);
        let drop = LookupKey::new("DROP", 1);
        for key in [keep.clone(), drop.clone()] {
            let _ = cache
                .get_or_build(key, || async { Ok(empty_lookup()) })
                .await;
        }

        cache.invalidate_report("DROP").await;
        assert!(cache.contains(&keep).await);
        assert!(!cache.contains(&drop).await);
    }

    #[tokio::test]
    async fn stale_waiter_leaves_a_newer_build_alone() {
        let cache = LookupCache::new();
        let key = LookupKey::new("ABC123", 1);
        let (_tx, rx) = watch::channel(None);
        cache
            .entries
            .lock()
            .await
            .insert(key.clone(), EntryState::InFlight { build_id: 7, rx });

        // A waiter left over from an older, abandoned build must not evict
        // the slot a newer build now occupies.
        cache.remove_in_flight(&key, 3).await;
        assert!(matches!(
            cache.entries.lock().await.get(&key),
            Some(EntryState::InFlight { build_id: 7, .. })
        ));

        // The waiter of the same build may.
        cache.remove_in_flight(&key, 7).await;
        assert!(cache.entries.lock().await.get(&key).is_none());
    }

    #[tokio::test]
    async fn distinct_fights_build_separately() {
        let cache = LookupCache::new();
        let builds = AtomicUsize::new(0);
        for fight_id in [1, 2] {
            let _ = cache
                .get_or_build(LookupKey::new("ABC123", fight_id), || async {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(empty_lookup())
                })
                .await;
        }
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }
}
