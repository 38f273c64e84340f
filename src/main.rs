//! # openflis
//!
//! Looks up National Item Identification Numbers (NIINs) in the OpenFLIS
//! logistics API and prints the records.
//!
//! Without arguments an interactive menu is shown. With `--table` or
//! `--summary` and a NIIN a single lookup is printed and the program exits.

mod client;
mod display;
mod error;
mod repl;
mod services;
mod summary;
mod table;

use client::{ClientConfig, FlisClient, RecordSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use error::API_KEY_VAR;
use table::Table;

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Handle user input
#[derive(Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("mode").args(["table", "summary"])))]
pub struct Cli {
    /// NIIN to look up once instead of starting the menu
    #[arg(requires = "mode", value_parser = parse_niin)]
    pub niin: Option<String>,
    /// Table to query for NIIN
    #[arg(long, value_enum, requires = "niin")]
    pub table: Option<Table>,
    /// Print the part summary for NIIN
    #[arg(long, requires = "niin")]
    pub summary: bool,
    /// OpenFLIS API key
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,
    /// Query endpoint
    #[arg(long, env = "OPENFLIS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Trims a NIIN given on the command line and refuses blank ones.
fn parse_niin(s: &str) -> Result<String, String> {
    let niin = s.trim();
    if niin.is_empty() {
        return Err(String::from("NIIN must not be empty"));
    }
    Ok(niin.to_string())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Prints a single table lookup. Fails when the query does.
fn lookup_table(client: &FlisClient, table: Table, niin: &str, out: &mut impl Write) -> Result<()> {
    let payload = client
        .query(table, niin)
        .with_context(|| format!("could not query {} for NIIN {}", table.upstream(), niin))?;
    display::display_payload(out, Some(&payload))?;
    Ok(())
}

/// Prints a part summary. Fails if any part of it could not be fetched.
fn lookup_summary(client: &FlisClient, niin: &str, out: &mut impl Write) -> Result<()> {
    let summary = summary::part_summary(client, niin);
    display::display_part_summary(out, &summary)?;
    if !summary.errors.is_empty() {
        bail!("part summary for NIIN {} is incomplete", niin);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Only the working directory's .env; variables already set take precedence
    let dotenv = dotenvy::from_path(".env");

    let args = Cli::parse();
    init_logging(args.verbose);

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!("could not load .env: {}", e);
        }
    }

    let client = FlisClient::new(ClientConfig {
        base_url: args.base_url,
        api_key:  args.api_key,
        timeout:  Duration::from_secs(args.timeout),
    })?;

    let mut out = std::io::stdout().lock();

    match (args.niin.as_deref(), args.table) {
        (Some(niin), Some(table)) => lookup_table(&client, table, niin, &mut out),
        (Some(niin), None)        => lookup_summary(&client, niin, &mut out),
        (None, _)                 => repl::run(&client, std::io::stdin().lock(), &mut out),
    }
}
