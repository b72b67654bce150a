//! Estimate token counts for text.

use tokenledger_core::estimate_tokens;

pub fn handle(text: &[String], json: bool) -> anyhow::Result<()> {
    let joined = text.join(" ");
    let tokens = estimate_tokens(&joined);

    if json {
        println!("{}", serde_json::json!({ "tokens": tokens }));
        return Ok(());
    }

    println!("~{} tokens ({} characters)", tokens, joined.len());
    Ok(())
}
