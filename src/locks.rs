//! Mutexes created on demand per key and dropped once nobody holds them.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

/// A map of mutexes keyed by `K`.
///
/// An entry lives only while some caller holds or waits on it, so keys that
/// are used once (unknown ids, abandoned games) do not accumulate.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `f` while holding the mutex for `key`.
    pub fn with<R>(&self, key: K, f: impl FnOnce() -> R) -> R {
        let lock = Arc::clone(
            self.locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        );

        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        // Clones are only handed out under the map lock, so a count of one
        // after dropping ours means no other caller holds the entry.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(&key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&key);
        }
        result
    }

    /// Number of keys currently held or waited on.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no key is held.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_entry_dropped_after_use() {
        let locks = KeyedLocks::new();
        let value = locks.with("a", || {
            assert_eq!(locks.len(), 1);
            7
        });
        assert_eq!(value, 7);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_same_key_serializes() {
        let locks = KeyedLocks::new();
        let counter = Mutex::new(0u32);
        let barrier = Barrier::new(8);
        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    barrier.wait();
                    locks.with(1u64, || {
                        let seen = *counter.lock().unwrap();
                        thread::yield_now();
                        *counter.lock().unwrap() = seen + 1;
                    });
                });
            }
        });
        assert_eq!(*counter.lock().unwrap(), 8);
        assert!(locks.is_empty());
    }
}
