//! Record assembly from rendered article HTML.

use super::body::extract_body;
use super::fields::{
    AUTHOR_RULES, DESCRIPTION_RULES, HEADLINE_RULES, PUBLISHED_DATE_RULES, extract_field,
};
use crate::models::ArticleRecord;
use scraper::Html;
use tracing::{info, instrument};

/// Parse rendered HTML and build the [`ArticleRecord`] for `url`.
///
/// Never fails: a field whose cascade finds nothing is left as `None`.
#[instrument(level = "info", skip_all, fields(%url, bytes = html.len()))]
pub fn extract_article(url: &str, html: &str) -> ArticleRecord {
    let document = Html::parse_document(html);
    let record = assemble(url, &document);

    let found = record.fields().iter().filter(|(_, v)| v.is_some()).count();
    info!(found, "Extracted article fields");
    record
}

/// Build the record from an already-parsed document.
///
/// # Arguments
///
/// * `url` - Stored verbatim as the record's `url`
/// * `document` - The rendered article page
///
/// # Returns
///
/// A record whose fields are each the first value their cascade finds, or `None`.
pub fn assemble(url: &str, document: &Html) -> ArticleRecord {
    ArticleRecord {
        url: url.to_string(),
        headline: extract_field(document, HEADLINE_RULES),
        author: extract_field(document, AUTHOR_RULES),
        published_date: extract_field(document, PUBLISHED_DATE_RULES),
        description: extract_field(document, DESCRIPTION_RULES),
        body: extract_body(document),
    }
}
