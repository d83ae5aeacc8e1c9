//! Process-wide per-party mutex registry.
//!
//! The reference engine serializes party mutation implicitly, one request at
//! a time, behind its HTTP handlers. Dropping the HTTP layer removes that
//! serialization, so every action-api operation and the bot orchestrator
//! must explicitly acquire a party's lock before reading its repository
//! state and hold it through persistence and event publication. Grounded on
//! the keyed-mutex registry pattern used for per-table coordinators
//! elsewhere in the pack (a `DashMap<Key, Arc<Mutex<()>>>` created lazily per
//! key), adapted here to party ids.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// Lazily-created `Mutex<()>` per party id. Holding the guard is what
/// "holding the party lock" means throughout the action api.
#[derive(Default)]
pub struct PartyLockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PartyLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    fn handle(&self, party_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(party_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire the lock for `party_id`, blocking until available.
    pub async fn lock(&self, party_id: &str) -> PartyGuard {
        let handle = self.handle(party_id);
        let guard = handle.lock_owned().await;
        PartyGuard { _guard: guard }
    }
}

/// RAII guard over a party's serialization lock. The `MutexGuard` it wraps
/// has no payload; the value held is mutual exclusion on the (party_id,
/// round, repository) triple for the duration of one action.
pub struct PartyGuard {
    _guard: tokio::sync::OwnedMutexGuard<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn same_party_serializes_concurrent_critical_sections() {
        let registry = Arc::new(PartyLockRegistry::new());
        let counter = Arc::new(AtomicU32::new(0));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let registry = registry.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = registry.lock("party-1").await;
                let before = counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(1)).await;
                assert_eq!(counter.load(Ordering::SeqCst), before + 1);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn different_parties_do_not_contend() {
        let registry = PartyLockRegistry::new();
        let g1 = registry.lock("party-a").await;
        let g2 = registry.lock("party-b").await;
        drop(g1);
        drop(g2);
    }
}
