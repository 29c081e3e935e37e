//! Article body assembly.
//!
//! Finds the article container, keeps its non-boilerplate paragraphs and
//! joins them with blank lines. A container without usable paragraphs
//! contributes its whole text as a single block instead.

use super::fields::{element_text, parse_selector};
use scraper::{ElementRef, Html};
use tracing::debug;

/// Candidate body containers, semantic elements first.
pub const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    r#"[data-testid="article-body"]"#,
    ".article-body",
    ".article-content",
    ".content-body",
    ".entry-content",
    "#article-body",
    "#main-content article",
    "main article",
];

/// Paragraphs dropped when their whole lower-cased text equals one of these.
pub const BOILERPLATE: &[&str] = &["advertisement", "related resources"];

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Extract the article body.
///
/// # Arguments
///
/// * `document` - The parsed article page
///
/// # Returns
///
/// Surviving paragraphs joined by blank lines, the container's whole text
/// when no paragraph survives, or `None` when no container matches.
pub fn extract_body(document: &Html) -> Option<String> {
    let container = find_container(document)?;
    let paragraphs = collect_paragraphs(container);
    debug!(paragraphs = paragraphs.len(), "Collected body paragraphs");

    if paragraphs.is_empty() {
        element_text(container)
    } else {
        Some(paragraphs.join(PARAGRAPH_SEPARATOR))
    }
}

fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    CONTAINER_SELECTORS.iter().find_map(|sel| {
        let selector = parse_selector(sel)?;
        let found = document.select(&selector).next()?;
        debug!(selector = sel, "Matched body container");
        Some(found)
    })
}

fn collect_paragraphs(container: ElementRef<'_>) -> Vec<String> {
    let Some(selector) = parse_selector("p") else {
        return Vec::new();
    };
    container
        .select(&selector)
        .filter_map(element_text)
        .filter(|text| !is_boilerplate(text))
        .collect()
}

/// Exact, case-insensitive match against [`BOILERPLATE`].
pub fn is_boilerplate(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BOILERPLATE.iter().any(|phrase| *phrase == lowered)
}
