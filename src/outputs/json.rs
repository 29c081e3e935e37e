//! JSON output for an [`ArticleRecord`].
//!
//! The file holds a single object with the six record keys in order, absent
//! fields as `null`, indented with two spaces. Non-ASCII text is written
//! literally, not escaped.

use crate::models::ArticleRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write `record` as pretty-printed JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_record(record: &ArticleRecord, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(record)?;

    info!(path = %path, "Writing JSON");
    fs::write(path, &json).await?;
    info!(path = %path, bytes = json.len(), "Wrote JSON file");

    Ok(())
}
