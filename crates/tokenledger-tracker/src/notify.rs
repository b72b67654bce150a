//! Observer registration for usage change notifications.

use std::sync::Arc;

use parking_lot::Mutex;

use tokenledger_core::UsageRecord;

/// Callback interface for usage changes.
///
/// Observers are invoked synchronously on the thread that performed the
/// write, after the record has been persisted.
pub trait UsageObserver: Send + Sync {
    /// Called with the record that was just written (or loaded at startup).
    fn on_change(&self, record: &UsageRecord);
}

impl<F> UsageObserver for F
where
    F: Fn(&UsageRecord) + Send + Sync,
{
    fn on_change(&self, record: &UsageRecord) {
        self(record)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    observers: Vec<(ObserverId, Arc<dyn UsageObserver>)>,
}

/// Registry of subscribed observers.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Mutex<RegistryInner>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer, returning its handle.
    pub fn subscribe(&self, observer: Arc<dyn UsageObserver>) -> ObserverId {
        let mut inner = self.inner.lock();
        let id = ObserverId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(oid, _)| *oid != id);
        inner.observers.len() != before
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.inner.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().observers.is_empty()
    }

    /// Deliver `record` to every observer.
    ///
    /// The observer list is snapshotted before dispatch so a callback may
    /// subscribe or unsubscribe reentrantly without deadlocking.
    pub fn notify(&self, record: &UsageRecord) {
        let snapshot: Vec<Arc<dyn UsageObserver>> = {
            let inner = self.inner.lock();
            inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };

        for observer in snapshot {
            observer.on_change(record);
        }
    }
}
