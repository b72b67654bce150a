//! The persisted usage record.

use serde::{Deserialize, Serialize};

/// Quota granted to a fresh ledger.
pub const DEFAULT_TOTAL_TOKENS: u64 = 2_000_000;

/// Tokens added to the quota by a single bonus grant.
pub const BONUS_TOKENS: u64 = 1_000_000;

/// The persisted pair of total and used token counts.
///
/// Serialized with camelCase field names (`totalTokens`/`usedTokens`), which
/// is the on-disk wire format. Nothing constrains `used_tokens` against
/// `total_tokens`: exceeding the quota is observable state, only reported by
/// [`limit_reached`](UsageRecord::limit_reached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Total tokens available
    pub total_tokens: u64,
    /// Tokens consumed so far
    pub used_tokens: u64,
}

impl Default for UsageRecord {
    fn default() -> Self {
        Self {
            total_tokens: DEFAULT_TOTAL_TOKENS,
            used_tokens: 0,
        }
    }
}

impl UsageRecord {
    /// Create a record with the given counts.
    pub fn new(total_tokens: u64, used_tokens: u64) -> Self {
        Self {
            total_tokens,
            used_tokens,
        }
    }

    /// Whether the quota is exhausted. Equality counts as reached.
    pub fn limit_reached(&self) -> bool {
        self.used_tokens >= self.total_tokens
    }

    /// How many tokens remain before the quota is exhausted.
    pub fn remaining_tokens(&self) -> u64 {
        self.total_tokens.saturating_sub(self.used_tokens)
    }

    /// Fraction of the quota consumed, clamped to `1.0`.
    ///
    /// A zero quota reports `1.0` (there is nothing left to spend).
    pub fn fraction_used(&self) -> f64 {
        if self.total_tokens == 0 {
            return 1.0;
        }
        (self.used_tokens as f64 / self.total_tokens as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_full_quota() {
        let record = UsageRecord::default();
        assert_eq!(record.total_tokens, DEFAULT_TOTAL_TOKENS);
        assert_eq!(record.used_tokens, 0);
        assert!(!record.limit_reached());
    }

    #[test]
    fn limit_reached_at_boundary() {
        let record = UsageRecord::new(100, 100);
        assert!(record.limit_reached());

        let record = UsageRecord::new(100, 99);
        assert!(!record.limit_reached());

        // Overflow past the quota still reports reached.
        let record = UsageRecord::new(100, 150);
        assert!(record.limit_reached());
    }

    #[test]
    fn remaining_saturates_past_quota() {
        let record = UsageRecord::new(100, 150);
        assert_eq!(record.remaining_tokens(), 0);

        let record = UsageRecord::new(100, 30);
        assert_eq!(record.remaining_tokens(), 70);
    }

    #[test]
    fn fraction_used_is_clamped() {
        let record = UsageRecord::new(100, 50);
        assert_eq!(record.fraction_used(), 0.5);

        let record = UsageRecord::new(100, 200);
        assert_eq!(record.fraction_used(), 1.0);

        let record = UsageRecord::new(0, 0);
        assert_eq!(record.fraction_used(), 1.0);
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let record = UsageRecord::new(2_000_000, 3);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"totalTokens":2000000,"usedTokens":3}"#);

        let parsed: UsageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
