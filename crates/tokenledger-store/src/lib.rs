//! # tokenledger-store
//!
//! Key-value storage for tokenledger.
//!
//! This crate provides:
//! - The [`KeyValueStore`] trait the tracker is built against
//! - [`JsonFileStore`], a single-file JSON map backend
//! - [`MemoryStore`], an in-process backend for tests and ephemeral use
//!
//! ## Storage Architecture
//!
//! The durable backend is one JSON object file of string keys to opaque
//! string values, by default at
//! `~/.local/share/tokenledger/ledger.json`. There is no locking discipline
//! across processes: concurrent writers to the same file can lose updates.

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage path error: {0}")]
    PathError(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String key-value storage trait for abstraction over storage backends.
///
/// Values are opaque to the store; callers serialize what they persist.
/// Implementations take `&self` and handle their own interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
