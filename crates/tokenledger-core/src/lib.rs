//! # tokenledger-core
//!
//! Core types for tokenledger - the local token usage ledger.
//!
//! This crate provides:
//! - The persisted usage record and quota constants
//! - The character-based token estimator
//! - Configuration system

pub mod config;
pub mod estimate;
pub mod usage;

pub use config::{Config, DisplayConfig, QuotaConfig, StorageConfig};
pub use estimate::estimate_tokens;
pub use usage::{UsageRecord, BONUS_TOKENS, DEFAULT_TOTAL_TOKENS};
