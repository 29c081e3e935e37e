//! # Article Snapshot
//!
//! Renders one news article in headless Chromium, pulls out its headline,
//! author, publication date, description and body text, prints a preview,
//! and saves the result as JSON and CSV.
//!
//! ## Usage
//!
//! ```sh
//! article_snapshot
//! article_snapshot -u https://example.com/news/story -j story.json -c story.csv
//! ```
//!
//! ## Flow
//!
//! 1. **Rendering**: Launch the browser, load the page, capture the DOM
//! 2. **Extraction**: Run the per-field cascades and the body walk
//! 3. **Preview**: Print every field to stdout, body shortened
//! 4. **Output**: Write the JSON file, then the CSV file

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::{article, browser};

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_snapshot starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let html = browser::fetch(&args.url).await?;
    let record = article::extract_article(&args.url, &html);

    print!("{}", record.preview());

    outputs::json::write_record(&record, &args.json_output).await?;
    outputs::csv::write_record(&record, &args.csv_output).await?;
    println!("\nSaved -> {} and {}", args.json_output, args.csv_output);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
