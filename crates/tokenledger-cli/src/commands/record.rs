//! Record one interaction.

use tokenledger_core::estimate_tokens;
use tokenledger_store::KeyValueStore;
use tokenledger_tracker::UsageTracker;

use crate::output;

pub fn handle<S: KeyValueStore>(
    tracker: &UsageTracker<S>,
    input: &str,
    output_text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let record = tracker.record_interaction(input, output_text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "Recorded: input ~{} tokens, output ~{} tokens",
        estimate_tokens(input),
        estimate_tokens(output_text)
    );
    println!(
        "Usage: {} / {} tokens",
        output::group_thousands(record.used_tokens),
        output::group_thousands(record.total_tokens)
    );

    if record.limit_reached() {
        println!("Token limit reached. Grant more tokens to continue.");
    }

    Ok(())
}
