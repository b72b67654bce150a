//! Write the usage record directly.

use tokenledger_store::KeyValueStore;
use tokenledger_tracker::UsageTracker;

use crate::output;

pub fn handle<S: KeyValueStore>(
    tracker: &UsageTracker<S>,
    total: Option<u64>,
    used: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    // Unspecified fields keep their current values.
    let mut record = tracker.usage()?;
    if let Some(total) = total {
        record.total_tokens = total;
    }
    if let Some(used) = used {
        record.used_tokens = used;
    }

    tracker.set_usage(&record)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "Usage set to {} / {} tokens",
        output::group_thousands(record.used_tokens),
        output::group_thousands(record.total_tokens)
    );

    Ok(())
}
