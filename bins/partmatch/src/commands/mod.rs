//! CLI command implementations

pub mod categories;
pub mod check;
pub mod health;
pub mod search;

use owo_colors::OwoColorize;

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print a section banner.
pub fn print_banner(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// Placeholder for empty fields in text output.
pub fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}
