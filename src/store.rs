//! Append-only log of recorded samples.
//!
//! A [`SampleStore`] is a cheap handle: clones share the same log, so every
//! [`crate::recorder::Recorder`] handed out by a session appends to the store
//! that session reports on. Appends and snapshots take the lock for the whole
//! operation, so a snapshot never observes a half-written sample.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::schema::Sample;

#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Arc<Mutex<Vec<Sample>>>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking workload never holds this lock, so poisoning can only come
    // from a panic inside Vec::push/clone; the data is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Sample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, sample: Sample) {
        self.lock().push(sample);
    }

    /// Point-in-time copy of every sample appended so far, in append order.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_preserves_append_order() {
        let store = SampleStore::new();
        store.append(Sample::from_millis("b", 10, 1.0));
        store.append(Sample::from_millis("a", 10, 2.0));
        store.append(Sample::from_millis("b", 100, 3.0));

        let names: Vec<_> = store
            .snapshot()
            .iter()
            .map(|s| (s.function_name().to_string(), s.input_size()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("b".to_string(), 10),
                ("a".to_string(), 10),
                ("b".to_string(), 100)
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let store = SampleStore::new();
        store.append(Sample::from_millis("a", 10, 1.0));
        store.append(Sample::from_millis("a", 10, 2.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let store = SampleStore::new();
        store.append(Sample::from_millis("a", 10, 1.0));
        assert_eq!(store.snapshot(), store.snapshot());
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let store = SampleStore::new();
        store.append(Sample::from_millis("a", 10, 1.0));
        let before = store.snapshot();
        store.append(Sample::from_millis("a", 100, 4.0));
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_the_log() {
        let store = SampleStore::new();
        let handle = store.clone();
        handle.append(Sample::from_millis("a", 10, 1.0));
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let store = SampleStore::new();
        std::thread::scope(|s| {
            for t in 0..4 {
                let store = store.clone();
                s.spawn(move || {
                    for i in 0..250 {
                        store.append(Sample::from_millis(format!("t{t}"), i, 1.0));
                    }
                });
            }
        });
        assert_eq!(store.len(), 1000);
    }
}
