//! Catalog validation command

use super::{or_dash, print_banner};
use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use partmatch_catalog::ValidationReport;

/// Run validation; returns whether the catalog passed.
///
/// Always fetches fresh data so the report reflects the sheet as it is now.
pub async fn run(ctx: &Context, expected: Option<usize>, format: &str) -> Result<bool> {
    let catalog = ctx.catalog(true).await?;
    let expected = expected.or(ctx.config.schema.validation.expected_count);
    let report = ValidationReport::from_items(&catalog, expected);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.is_valid());
    }

    print_banner("📋 Catalog Validation");

    let expected_str = report
        .expected
        .map_or_else(|| "—".to_string(), |n| n.to_string());
    println!("  Total:       {}", report.total);
    println!("  Expected:    {expected_str}");
    println!("  Complete:    {}", report.complete.to_string().green());
    println!("  Incomplete:  {}", report.incomplete.to_string().yellow());
    println!();
    println!("  Missing name:  {}", report.missing.name);
    println!("  Missing TOK:   {}", report.missing.tok_code);
    println!("  Missing OEM:   {}", report.missing.oem_code);
    println!("  Missing model: {}", report.missing.model);

    if !report.incomplete_items.is_empty() {
        println!();
        println!("  {}", "First incomplete products:".yellow());
        for product in &report.incomplete_items {
            println!(
                "    • {} (TOK: {}, OEM: {}, model: {})",
                or_dash(&product.name),
                or_dash(&product.tok_code),
                or_dash(&product.oem_code),
                or_dash(&product.model)
            );
        }
    }

    println!();
    if report.is_valid() {
        println!("  {} {}", "✓".green().bold(), report.message);
    } else {
        println!("  {} {}", "⚠".yellow().bold(), report.message);
    }
    println!();

    Ok(report.is_valid())
}
