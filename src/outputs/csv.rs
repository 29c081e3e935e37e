//! CSV output for an [`ArticleRecord`].
//!
//! One header row of field names followed by one data row. Absent fields are
//! empty cells. Rows end in CRLF and fields are quoted only when they contain
//! a delimiter, quote or line break, so multi-paragraph bodies stay one cell.

use crate::models::ArticleRecord;
use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write `record` as a two-row CSV to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if encoding or the file write fails.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn write_record(record: &ArticleRecord, path: &str) -> Result<(), Box<dyn Error>> {
    let bytes = to_csv_bytes(record)?;

    info!(path = %path, "Writing CSV");
    fs::write(path, &bytes).await?;
    info!(path = %path, bytes = bytes.len(), "Wrote CSV file");

    Ok(())
}

/// Encode header and data row; the header comes from the record's field names.
///
/// # Arguments
///
/// * `record` - The record to encode
///
/// # Returns
///
/// The CSV bytes for both rows, CRLF-terminated.
pub fn to_csv_bytes(record: &ArticleRecord) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer.into_inner().map_err(|e| e.into_error().into())
}
