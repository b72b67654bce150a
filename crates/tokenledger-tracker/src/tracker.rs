//! The usage tracker service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use tokenledger_core::{estimate_tokens, QuotaConfig, UsageRecord};
use tokenledger_store::{KeyValueStore, StoreError};

use crate::notify::{ObserverId, ObserverRegistry, UsageObserver};

/// Storage key the usage record lives under.
pub const USAGE_KEY: &str = "tokenledger.usage";

/// Errors that can occur during tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid usage record: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Tracks token usage against a quota, persisting one record in the store.
///
/// Every operation is a synchronous read-modify-write on the calling
/// thread. The store owns the durable record; values handed to callers are
/// disposable snapshots. Explicit writes notify subscribed observers; the
/// lazy initialization inside [`usage`](Self::usage) does not.
pub struct UsageTracker<S: KeyValueStore> {
    store: S,
    quota: QuotaConfig,
    observers: ObserverRegistry,
}

impl<S: KeyValueStore> UsageTracker<S> {
    /// Create a tracker with the default quota.
    pub fn new(store: S) -> Self {
        Self::with_quota(store, QuotaConfig::default())
    }

    /// Create a tracker with a configured quota.
    pub fn with_quota(store: S, quota: QuotaConfig) -> Self {
        Self {
            store,
            quota,
            observers: ObserverRegistry::new(),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register an observer for usage changes.
    pub fn subscribe<O: UsageObserver + 'static>(&self, observer: O) -> ObserverId {
        self.observers.subscribe(Arc::new(observer))
    }

    /// Remove a previously registered observer.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Read the current record, initializing it on first access.
    ///
    /// A missing record is replaced by the default quota and persisted
    /// without notifying observers. A record that no longer parses
    /// propagates as [`TrackerError::Serialization`].
    pub fn usage(&self) -> Result<UsageRecord> {
        if let Some(raw) = self.store.get(USAGE_KEY)? {
            return Ok(serde_json::from_str(&raw)?);
        }

        let record = UsageRecord::new(self.quota.default_total_tokens, 0);
        self.write(&record)?;
        info!(total = record.total_tokens, "initialized usage record");
        Ok(record)
    }

    /// Persist `record` verbatim, then notify observers.
    pub fn set_usage(&self, record: &UsageRecord) -> Result<()> {
        self.write(record)?;
        self.observers.notify(record);
        Ok(())
    }

    /// Add the estimated tokens of one interaction to the used count.
    pub fn record_interaction(&self, input: &str, output: &str) -> Result<UsageRecord> {
        let mut record = self.usage()?;

        let input_tokens = estimate_tokens(input);
        let output_tokens = estimate_tokens(output);
        record.used_tokens = record
            .used_tokens
            .saturating_add(input_tokens)
            .saturating_add(output_tokens);

        self.set_usage(&record)?;
        debug!(
            input = input_tokens,
            output = output_tokens,
            used = record.used_tokens,
            total = record.total_tokens,
            "recorded interaction"
        );
        Ok(record)
    }

    /// Add the configured bonus to the total quota.
    pub fn grant_bonus(&self) -> Result<UsageRecord> {
        let mut record = self.usage()?;
        record.total_tokens = record.total_tokens.saturating_add(self.quota.bonus_tokens);

        self.set_usage(&record)?;
        info!(total = record.total_tokens, "granted bonus tokens");
        Ok(record)
    }

    /// Whether the current record has exhausted its quota.
    pub fn limit_reached(&self) -> Result<bool> {
        let record = self.usage()?;
        let reached = record.limit_reached();
        if reached {
            warn!(
                used = record.used_tokens,
                total = record.total_tokens,
                "token limit reached"
            );
        }
        Ok(reached)
    }

    /// Load (or initialize) the record and broadcast it once.
    ///
    /// Run this at startup so observers can display initial state.
    pub fn bootstrap(&self) -> Result<UsageRecord> {
        let record = self.usage()?;
        self.observers.notify(&record);
        Ok(record)
    }

    fn write(&self, record: &UsageRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        self.store.set(USAGE_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use tokenledger_core::DEFAULT_TOTAL_TOKENS;
    use tokenledger_store::MemoryStore;

    fn create_test_tracker() -> UsageTracker<MemoryStore> {
        UsageTracker::new(MemoryStore::new())
    }

    fn record_sink(
        tracker: &UsageTracker<MemoryStore>,
    ) -> (ObserverId, Arc<Mutex<Vec<UsageRecord>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = tracker.subscribe(move |record: &UsageRecord| {
            sink.lock().push(*record);
        });
        (id, seen)
    }

    #[test]
    fn test_first_usage_initializes_and_persists() {
        let tracker = create_test_tracker();

        let record = tracker.usage().unwrap();
        assert_eq!(record.total_tokens, DEFAULT_TOTAL_TOKENS);
        assert_eq!(record.used_tokens, 0);

        // Persisted under the fixed key with wire field names.
        let raw = tracker.store().get(USAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"totalTokens":2000000,"usedTokens":0}"#);
    }

    #[test]
    fn test_initializing_read_does_not_notify() {
        let tracker = create_test_tracker();
        let (_id, seen) = record_sink(&tracker);

        tracker.usage().unwrap();
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_set_usage_round_trip() {
        let tracker = create_test_tracker();

        let record = UsageRecord::new(5_000, 1_234);
        tracker.set_usage(&record).unwrap();
        assert_eq!(tracker.usage().unwrap(), record);
    }

    #[test]
    fn test_set_usage_notifies_observers() {
        let tracker = create_test_tracker();
        let (_id, seen) = record_sink(&tracker);

        let record = UsageRecord::new(5_000, 10);
        tracker.set_usage(&record).unwrap();

        assert_eq!(seen.lock().as_slice(), &[record]);
    }

    #[test]
    fn test_record_interaction_adds_estimates() {
        let tracker = create_test_tracker();

        // "hi" -> 1 token, "there" -> 2 tokens
        let record = tracker.record_interaction("hi", "there").unwrap();
        assert_eq!(record.used_tokens, 3);
        assert_eq!(record.total_tokens, DEFAULT_TOTAL_TOKENS);

        let record = tracker.record_interaction("hi", "there").unwrap();
        assert_eq!(record.used_tokens, 6);
    }

    #[test]
    fn test_record_interaction_with_empty_text() {
        let tracker = create_test_tracker();
        let record = tracker.record_interaction("", "").unwrap();
        assert_eq!(record.used_tokens, 0);
    }

    #[test]
    fn test_grant_bonus_leaves_used_unchanged() {
        let tracker = create_test_tracker();
        tracker.record_interaction("hi", "there").unwrap();

        let record = tracker.grant_bonus().unwrap();
        assert_eq!(record.total_tokens, DEFAULT_TOTAL_TOKENS + 1_000_000);
        assert_eq!(record.used_tokens, 3);
    }

    #[test]
    fn test_configured_quota() {
        let quota = QuotaConfig {
            default_total_tokens: 100,
            bonus_tokens: 50,
        };
        let tracker = UsageTracker::with_quota(MemoryStore::new(), quota);

        assert_eq!(tracker.usage().unwrap().total_tokens, 100);
        assert_eq!(tracker.grant_bonus().unwrap().total_tokens, 150);
    }

    #[test]
    fn test_limit_reached_boundary() {
        let tracker = create_test_tracker();

        tracker.set_usage(&UsageRecord::new(100, 99)).unwrap();
        assert!(!tracker.limit_reached().unwrap());

        tracker.set_usage(&UsageRecord::new(100, 100)).unwrap();
        assert!(tracker.limit_reached().unwrap());

        // Not clamped: exceeding the quota is allowed and observable.
        tracker.set_usage(&UsageRecord::new(100, 130)).unwrap();
        assert_eq!(tracker.usage().unwrap().used_tokens, 130);
        assert!(tracker.limit_reached().unwrap());
    }

    #[test]
    fn test_bootstrap_notifies_once() {
        let tracker = create_test_tracker();
        let (_id, seen) = record_sink(&tracker);

        let record = tracker.bootstrap().unwrap();
        assert_eq!(seen.lock().as_slice(), &[record]);
    }

    #[test]
    fn test_unsubscribed_observer_stops_receiving() {
        let tracker = create_test_tracker();
        let (id, seen) = record_sink(&tracker);

        tracker.set_usage(&UsageRecord::default()).unwrap();
        assert!(tracker.unsubscribe(id));
        tracker.set_usage(&UsageRecord::default()).unwrap();

        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_corrupt_record_surfaces_error() {
        let store = MemoryStore::new();
        store.set(USAGE_KEY, "not a record").unwrap();

        let tracker = UsageTracker::new(store);
        let err = tracker.usage().unwrap_err();
        assert!(matches!(err, TrackerError::Serialization(_)));
    }
}
