//! Data model for a single extracted article.
//!
//! [`ArticleRecord`] is the only entity the program produces. It is built once
//! per run, never mutated afterwards, and serialized to both JSON and CSV.
//! Field declaration order is the key order of both outputs.

use crate::utils::truncate_for_preview;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of body characters shown in the console preview.
pub const BODY_PREVIEW_CHARS: usize = 400;

/// The structured fields pulled from one article page.
///
/// Every optional field is either a non-empty, whitespace-normalized string or
/// `None`. `None` serializes as JSON `null` and as an empty CSV cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The page URL that was rendered. Always present.
    pub url: String,
    /// Article headline.
    pub headline: Option<String>,
    /// Byline, as published.
    pub author: Option<String>,
    /// Publication date exactly as the page states it; not parsed.
    pub published_date: Option<String>,
    /// Summary from the page's description meta tags.
    pub description: Option<String>,
    /// Article paragraphs separated by blank lines.
    pub body: Option<String>,
}

impl ArticleRecord {
    /// Field names in serialization order.
    pub const FIELD_NAMES: [&'static str; 6] = [
        "url",
        "headline",
        "author",
        "published_date",
        "description",
        "body",
    ];

    /// Pairs each field name with its value, in serialization order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        let [url, headline, author, published_date, description, body] = Self::FIELD_NAMES;
        [
            (url, Some(self.url.as_str())),
            (headline, self.headline.as_deref()),
            (author, self.author.as_deref()),
            (published_date, self.published_date.as_deref()),
            (description, self.description.as_deref()),
            (body, self.body.as_deref()),
        ]
    }

    /// Human-readable dump for the operator, with the body shortened.
    pub fn preview(&self) -> Preview<'_> {
        Preview(self)
    }
}

/// Console rendering of an [`ArticleRecord`].
///
/// Absent values print as `None`; the body is cut at
/// [`BODY_PREVIEW_CHARS`] characters with `...` appended when longer.
pub struct Preview<'a>(&'a ArticleRecord);

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- EXTRACTED ---")?;
        for (name, value) in self.0.fields() {
            match value {
                Some(v) if name == "body" => {
                    writeln!(f, "{name}: {}", truncate_for_preview(v, BODY_PREVIEW_CHARS))?
                }
                Some(v) => writeln!(f, "{name}: {v}")?,
                None => writeln!(f, "{name}: None")?,
            }
        }
        Ok(())
    }
}
