//! Search command

use super::{or_dash, print_banner};
use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use partmatch_catalog::{CatalogItem, ProductSummary};
use partmatch_search::{
    extract_categories, extract_model_names, find_by_model, strip_stopwords, MatchCounts, Matcher,
    TokenMatch,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSearchOutput {
    query: String,
    count: usize,
    results: Vec<JsonMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<Suggestions>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMatch {
    score: f64,
    counts: MatchCounts,
    product: ProductSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<Vec<TokenMatch>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Suggestions {
    models: Vec<&'static str>,
    model_products: Vec<ProductSummary>,
    categories: Vec<&'static str>,
}

/// Products to suggest when nothing matched: items for detected car
/// models, plus the catalog's categories.
fn suggestions(query: &str, catalog: &[CatalogItem], limit: usize) -> Suggestions {
    let models = extract_model_names(query);
    let mut model_products: Vec<ProductSummary> = Vec::new();

    for model in &models {
        for item in find_by_model(model, catalog, limit) {
            if model_products.len() < limit && !model_products.iter().any(|p| p.id == item.id) {
                model_products.push(item.summary());
            }
        }
    }

    Suggestions {
        models,
        model_products,
        categories: extract_categories(catalog),
    }
}

/// Run search command
pub async fn run(
    ctx: &Context,
    query: &str,
    limit: Option<usize>,
    refresh: bool,
    explain: bool,
    format: &str,
) -> Result<()> {
    let catalog = ctx.catalog(refresh).await?;
    let matcher = ctx.matcher();
    let limit = limit.unwrap_or(ctx.config.schema.search.default_limit);

    // Greeting-only queries have nothing to rank.
    let searchable = strip_stopwords(query);
    let ranked = if searchable.is_empty() {
        Vec::new()
    } else {
        matcher.rank(&searchable, &catalog, Some(limit))
    };
    let suggestions = ranked
        .is_empty()
        .then(|| suggestions(query, &catalog, ctx.config.schema.search.default_limit));

    if format == "json" {
        let output = JsonSearchOutput {
            query: query.to_string(),
            count: ranked.len(),
            results: ranked
                .iter()
                .map(|result| JsonMatch {
                    score: result.score,
                    counts: result.counts,
                    product: result.item.summary(),
                    explain: explain.then(|| matcher.explain(&searchable, result.item)),
                })
                .collect(),
            suggestions,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_banner(&format!("🔍 Search: {query}"));

    if ranked.is_empty() {
        println!("  {} No products found for \"{}\"", "✗".red(), query);
        if let Some(suggestions) = suggestions {
            print_suggestions(&suggestions);
        }
        println!();
        return Ok(());
    }

    for (i, result) in ranked.iter().enumerate() {
        print_item(i + 1, &result.item.summary(), Some(result.score));
        if explain {
            print_explain(&matcher, &searchable, result.item);
        }
    }

    println!();
    println!(
        "  {} {} of {} products matched",
        "✓".green().bold(),
        ranked.len(),
        catalog.len()
    );
    println!();

    Ok(())
}

fn print_item(position: usize, product: &ProductSummary, score: Option<f64>) {
    let score = score.map(|s| format!(" (score {s:.1})")).unwrap_or_default();
    println!("  {}. {}{}", position, or_dash(&product.name).bold(), score.dimmed());
    println!(
        "     TOK: {} | OEM: {}",
        or_dash(&product.tok_code).cyan(),
        or_dash(&product.oem_code).cyan()
    );
    println!("     Model: {}", or_dash(&product.model));
    println!(
        "     Price (VAT incl.): {} | Price (excl. VAT): {}",
        or_dash(&product.price_with_vat).green(),
        or_dash(&product.price_without_vat)
    );
    println!("     Stock: {}", or_dash(&product.stock));
}

fn print_explain(matcher: &Matcher<'_>, query: &str, item: &CatalogItem) {
    for token in matcher.explain(query, item) {
        println!(
            "       └─ {:<20} {:<10} {:>6.1}",
            token.token,
            format!("{:?}", token.kind).to_lowercase().dimmed(),
            token.points
        );
    }
}

fn print_suggestions(suggestions: &Suggestions) {
    if !suggestions.model_products.is_empty() {
        println!();
        println!(
            "  {} {}",
            "Products for".yellow(),
            suggestions.models.join(", ").yellow().bold()
        );
        println!();
        for (i, product) in suggestions.model_products.iter().enumerate() {
            print_item(i + 1, product, None);
        }
    }

    if !suggestions.categories.is_empty() {
        println!();
        println!("  {}", "Available categories:".yellow());
        for category in &suggestions.categories {
            println!("    • {category}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, model: &str) -> CatalogItem {
        CatalogItem::builder(id, name).model(model).build()
    }

    #[test]
    fn test_suggestions_by_model() {
        let catalog = vec![
            item("1", "Бампер", "Prius 30"),
            item("2", "Толь", "Harrier"),
            item("3", "Prius фар", "Prius 20"),
        ];

        let found = suggestions("p30 юу байна", &catalog, 10);
        assert_eq!(found.models, vec!["Prius"]);
        let ids: Vec<&str> = found.model_products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(found.categories, vec!["Бампер (Bumper)", "Толь (Mirror)", "Фар (Headlight)"]);
    }

    #[test]
    fn test_suggestions_deduplicate_and_cap() {
        let catalog = vec![
            item("1", "Prius Harrier adapter", "Prius"),
            item("2", "Harrier бампер", "Harrier"),
        ];

        let found = suggestions("prius harrier", &catalog, 1);
        assert_eq!(found.models, vec!["Prius", "Harrier"]);
        assert_eq!(found.model_products.len(), 1);
        assert_eq!(found.model_products[0].id, "1");
    }
}
