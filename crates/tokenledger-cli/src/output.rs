//! Display helpers for usage output.

use tokenledger_core::{DisplayConfig, UsageRecord};

/// Format a number with grouped thousands, e.g. `2,000,000`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a number with K/M suffix for compact display.
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Render a usage bar like `[######--------------]`.
pub fn usage_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

/// Format a token count per display settings.
pub fn format_tokens(n: u64, display: &DisplayConfig) -> String {
    if display.compact_numbers {
        format_compact_number(n)
    } else {
        group_thousands(n)
    }
}

/// Print a usage record the way the status display renders it.
pub fn print_usage(record: &UsageRecord, display: &DisplayConfig) {
    println!(
        "Usage: {} / {} tokens",
        format_tokens(record.used_tokens, display),
        format_tokens(record.total_tokens, display)
    );

    if display.show_bar {
        println!("{}", usage_bar(record.fraction_used(), 20));
    }

    if record.limit_reached() {
        println!("Token limit reached. Grant more tokens to continue.");
    }
}
