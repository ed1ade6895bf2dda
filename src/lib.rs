//! Cruise Scraper - itinerary extraction for a river-cruise operator
//!
//! Fetches the operator's listing page, follows every itinerary to its detail
//! page, and flattens routes, sailing dates, ships and prices into records.

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::error;

use application::{scrape, to_output_format};
use cli::Cli;
use infrastructure::config::AppConfig;
use infrastructure::logging::{flush_logging, init_logging_with_config, log_system_info};

/// Elapsed time as `H:MM:SS.ffffff`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        elapsed.subsec_micros()
    )
}

/// Scrape, print the result to stdout, then the elapsed time
pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging_with_config(&config.logging)?;
    log_system_info();

    let result = scrape_and_print(&cli, &config);
    flush_logging();
    result
}

fn scrape_and_print(cli: &Cli, config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let start = Instant::now();
    let outcome = runtime
        .block_on(scrape(&config.scraper, cli.fetch_mode()))
        .inspect_err(|e| error!("Scrape failed: {}", e))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.raw {
        serde_json::to_writer_pretty(&mut out, &outcome.cruises)?;
    } else {
        let records = to_output_format(&outcome.cruises)?;
        serde_json::to_writer_pretty(&mut out, &records)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", format_elapsed(start.elapsed()))?;

    Ok(())
}
