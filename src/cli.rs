//! Command-line interface definitions for Article Snapshot.
//!
//! Every option has a default, so running the binary with no arguments
//! renders the built-in article and writes both files to the working directory.
//! The flags only override those fixed defaults. There is no config file,
//! and the only environment variable consulted is `RUST_LOG` for log levels.

use clap::Parser;
use url::Url;

/// Article rendered when `--url` is not given.
pub const DEFAULT_URL: &str = "https://www.bbc.com/news/articles/crmddnge9yro";

/// Default JSON output file, relative to the working directory.
pub const DEFAULT_JSON_OUTPUT: &str = "techtarget_article.json";

/// Default CSV output file, relative to the working directory.
pub const DEFAULT_CSV_OUTPUT: &str = "techtarget_article.csv";

/// Command-line arguments for the Article Snapshot application.
///
/// # Examples
///
/// ```sh
/// # Built-in article, default file names
/// article_snapshot
///
/// # Another article, custom outputs
/// article_snapshot -u https://example.com/news/story -j story.json -c story.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article page to render and extract
    #[arg(short, long, default_value = DEFAULT_URL, value_parser = parse_absolute_url)]
    pub url: String,

    /// Path of the JSON file to write (overwritten if present)
    #[arg(short, long, default_value = DEFAULT_JSON_OUTPUT)]
    pub json_output: String,

    /// Path of the CSV file to write (overwritten if present)
    #[arg(short, long, default_value = DEFAULT_CSV_OUTPUT)]
    pub csv_output: String,
}

/// Accept only absolute URLs; the string is kept exactly as typed.
fn parse_absolute_url(s: &str) -> Result<String, String> {
    Url::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("not an absolute URL: {e}"))
}
