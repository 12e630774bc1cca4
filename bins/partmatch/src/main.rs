//! partmatch - auto-part catalog search CLI
//!
//! Searches a spreadsheet-backed parts catalog with Mongolian/English
//! transliteration, synonyms and typo tolerance.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use partmatch_core::error::exit_codes;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod logging;

use commands::{categories, check, health, search};
use context::Context;

/// Search an auto-part catalog by name, model or part code
#[derive(Parser)]
#[command(name = "partmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Configuration file (defaults to partmatch.toml discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read the catalog from a local CSV file instead of the sheet URL
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find products matching a free-text query
    Search {
        /// Query words, e.g. "p20 gpr" or "TOK123"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum results to show (0 shows all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Bypass the cached catalog
        #[arg(short, long)]
        refresh: bool,

        /// Show how each query token matched
        #[arg(long)]
        explain: bool,
    },

    /// Check that the catalog source is reachable
    Health,

    /// Validate catalog completeness
    Check {
        /// Expected product count (overrides configuration)
        #[arg(short, long)]
        expected: Option<usize>,
    },

    /// List part categories present in the catalog
    Categories,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.format == "json";

    if let Err(e) = logging::init(cli.verbose, json) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match Context::new(cli.config.as_deref(), cli.file.as_deref()) {
        Ok(ctx) => match cli.command {
            Commands::Search { query, limit, refresh, explain } => {
                search::run(&ctx, &query.join(" "), limit, refresh, explain, &cli.format)
                    .await
                    .map(|()| true)
            }
            Commands::Health => health::run(&ctx, &cli.format).await.map(|()| true),
            Commands::Check { expected } => check::run(&ctx, expected, &cli.format).await,
            Commands::Categories => categories::run(&ctx, &cli.format).await.map(|()| true),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => exit_code(exit_codes::VALIDATION_ERROR),
        Err(e) => {
            let core = e.downcast_ref::<partmatch_core::Error>();
            if json {
                if let Some(report) = core.map(partmatch_core::Error::to_report) {
                    if let Ok(rendered) = serde_json::to_string_pretty(&report) {
                        eprintln!("{rendered}");
                    }
                } else {
                    eprintln!("{}", serde_json::json!({ "message": format!("{e:#}") }));
                }
            } else {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
            exit_code(core.map_or(exit_codes::FAILURE, partmatch_core::Error::exit_code))
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
