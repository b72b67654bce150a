//! Show current usage.

use tokenledger_core::{DisplayConfig, UsageRecord};
use tokenledger_store::KeyValueStore;
use tokenledger_tracker::UsageTracker;

use crate::output;

pub fn handle<S: KeyValueStore>(
    tracker: &UsageTracker<S>,
    display: &DisplayConfig,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let record = tracker.bootstrap()?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    // The startup broadcast drives the display: subscribe a renderer and
    // let bootstrap deliver the initial record to it.
    let display = display.clone();
    tracker.subscribe(move |record: &UsageRecord| {
        output::print_usage(record, &display);
    });

    tracker.bootstrap()?;
    Ok(())
}
