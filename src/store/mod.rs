//! Injectable, observable dataset store.
//!
//! One [`DataStore`] replaces the ambient global data object: consumers
//! hold a cloned handle, read a consistent snapshot, and subscribe for
//! change notifications. [`DataStore::set`] swaps the dataset atomically
//! and then notifies every listener; listeners run after the lock is
//! released, so a listener may freely read the store again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::models::{today, Dataset, Metadata, Record};

type Listener = Arc<dyn Fn(&Dataset) + Send + Sync>;

struct Inner {
    dataset: Dataset,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Shared handle to the current dataset.
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<Mutex<Inner>>,
}

impl DataStore {
    /// Create a store holding an initial dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                dataset,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A consistent snapshot of the current dataset.
    pub fn snapshot(&self) -> Dataset {
        self.lock().dataset.clone()
    }

    /// The current record sequence.
    pub fn records(&self) -> Vec<Record> {
        self.lock().dataset.records.clone()
    }

    /// The current filter metadata.
    pub fn metadata(&self) -> Metadata {
        self.lock().dataset.metadata.clone()
    }

    /// Atomically replace the record sequence, stamp the update date and
    /// notify all listeners.
    ///
    /// Metadata is replaced only when given; otherwise the existing
    /// metadata is retained, matching the external update contract.
    pub fn set(&self, records: Vec<Record>, metadata: Option<Metadata>) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            inner.dataset.records = records;
            if let Some(metadata) = metadata {
                inner.dataset.metadata = metadata;
            }
            inner.dataset.last_updated = today();

            let listeners: Vec<Listener> = inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            (inner.dataset.clone(), listeners)
        };

        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Register a change listener, called with the new dataset after
    /// every [`DataStore::set`]. The returned handle removes the listener
    /// when consumed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Dataset) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Unsubscribe handle returned by [`DataStore::subscribe`].
#[must_use = "dropping the handle without calling unsubscribe leaves the listener registered"]
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Remove the listener. A no-op if the store is already gone.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
