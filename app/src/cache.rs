use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

pub struct Cache<T> {
    data: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Cache {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Cache<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // Entries are plain values, so a poisoned map is still consistent.
    fn get_connection(&self) -> MutexGuard<'_, HashMap<String, T>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes every entry for which `keep` returns false.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&String, &mut T) -> bool,
    {
        let mut conn = self.get_connection();
        conn.retain(keep);
    }

    pub fn count(&self) -> usize {
        self.get_connection().len()
    }
}

impl<T: Clone> Cache<T> {
    pub fn get_or_insert<F>(&self, id: &str, with: F) -> T
    where
        F: FnOnce() -> T,
    {
        let mut conn = self.get_connection();
        conn.entry(id.to_owned()).or_insert_with(with).clone()
    }
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One async mutex per tournament id.
///
/// Every join, submission and cancellation for a tournament runs while holding
/// its guard, so their read-check-write sequences never interleave in this
/// process. The conditional writes in `persistence::tournaments` hold the same
/// invariants at the database level.
#[derive(Clone, Default)]
pub struct TournamentLocks {
    locks: Cache<Arc<AsyncMutex<()>>>,
}

impl TournamentLocks {
    pub fn new() -> Self {
        Self {
            locks: Cache::new(),
        }
    }

    pub async fn acquire(&self, tournament_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_or_insert(tournament_id, || Arc::new(AsyncMutex::new(())));
        lock.lock_owned().await
    }

    /// Drops locks nobody is holding or waiting on.
    pub fn evict_idle(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn count(&self) -> usize {
        self.locks.count()
    }
}
