//! Categories command - list part categories in the catalog

use super::print_banner;
use crate::context::Context;
use anyhow::Result;
use partmatch_search::extract_categories;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonCategoriesOutput {
    total: usize,
    categories: Vec<&'static str>,
}

/// Run categories command
pub async fn run(ctx: &Context, format: &str) -> Result<()> {
    let catalog = ctx.catalog(false).await?;
    let categories = extract_categories(&catalog);

    if format == "json" {
        let output = JsonCategoriesOutput {
            total: categories.len(),
            categories,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_banner("🗂  Part Categories");
    for category in &categories {
        println!("  • {category}");
    }
    println!();
    println!("  {} categories across {} products", categories.len(), catalog.len());
    println!();

    Ok(())
}
