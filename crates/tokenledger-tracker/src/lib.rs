//! # tokenledger-tracker
//!
//! The usage tracker service for tokenledger.
//!
//! This crate provides:
//! - [`UsageTracker`], the read-modify-write service over an injected store
//! - Observer registration for change notifications
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tokenledger_store::JsonFileStore;
//! use tokenledger_tracker::UsageTracker;
//!
//! let store = JsonFileStore::open_default()?;
//! let tracker = UsageTracker::new(store);
//!
//! tracker.subscribe(|record: &tokenledger_core::UsageRecord| {
//!     println!("{} / {} tokens", record.used_tokens, record.total_tokens);
//! });
//!
//! // Loads (or initializes) the record and notifies observers once.
//! tracker.bootstrap()?;
//!
//! tracker.record_interaction("question", "answer")?;
//! ```

pub mod notify;
pub mod tracker;

pub use notify::{ObserverId, ObserverRegistry, UsageObserver};
pub use tracker::{TrackerError, UsageTracker, USAGE_KEY};
