//! Health check command

use super::print_banner;
use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use partmatch_catalog::DataSource;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHealthOutput {
    status: &'static str,
    source: String,
    latency_ms: u64,
    product_count: usize,
    cache_ttl_ms: u64,
}

/// Run health check against the configured catalog source
pub async fn run(ctx: &Context, format: &str) -> Result<()> {
    let started = Instant::now();
    let catalog = ctx.catalog(false).await?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = ctx.cache.status().await;

    if format == "json" {
        let output = JsonHealthOutput {
            status: "ok",
            source: ctx.cache.source().location().to_string(),
            latency_ms,
            product_count: catalog.len(),
            cache_ttl_ms: u64::try_from(status.ttl.as_millis()).unwrap_or(u64::MAX),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_banner("🏥 Catalog Health Check");

    println!("  Source:     {}", ctx.cache.source().location().dimmed());
    println!("  Status:     {}", "✓ OK".green());
    println!("  Latency:    {latency_ms}ms");
    println!("  Products:   {}", catalog.len());
    println!("  Cache TTL:  {:?}", status.ttl);
    if let Some(expires_in) = status.expires_in {
        println!("  Expires in: {}s", expires_in.as_secs());
    }
    println!();

    Ok(())
}
