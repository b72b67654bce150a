//! Grant bonus tokens.

use tokenledger_store::KeyValueStore;
use tokenledger_tracker::UsageTracker;

use crate::output;

pub fn handle<S: KeyValueStore>(tracker: &UsageTracker<S>, json: bool) -> anyhow::Result<()> {
    let record = tracker.grant_bonus()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "Granted bonus. New total: {} tokens ({} remaining)",
        output::group_thousands(record.total_tokens),
        output::group_thousands(record.remaining_tokens())
    );

    Ok(())
}
