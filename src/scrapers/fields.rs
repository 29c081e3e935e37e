//! Single-line field extraction over unreliable article markup.
//!
//! Each field is described by an ordered list of [`Rule`]s. Rules are tried in
//! order and the first one that yields a value wins, so more specific sources
//! sit at the front of each list and generic fallbacks at the back.

use crate::utils::clean;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Which `<meta>` attribute carries the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">`, used by OpenGraph and article tags.
    Property,
}

impl MetaAttr {
    fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// One step of a field cascade.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Text of the first element matched by the first selector that matches anything.
    Text(&'static [&'static str]),
    /// `content` of the first `<meta>` whose attribute equals the key.
    Meta(MetaAttr, &'static str),
}

impl Rule {
    fn apply(&self, document: &Html) -> Option<String> {
        match *self {
            Rule::Text(selectors) => first_text(document, selectors),
            Rule::Meta(attr, key) => meta_content(document, attr, key),
        }
    }
}

pub const HEADLINE_RULES: &[Rule] = &[
    Rule::Text(&["h1"]),
    Rule::Meta(MetaAttr::Property, "og:title"),
    Rule::Meta(MetaAttr::Name, "title"),
];

pub const AUTHOR_RULES: &[Rule] = &[
    Rule::Meta(MetaAttr::Name, "author"),
    Rule::Meta(MetaAttr::Property, "article:author"),
    Rule::Text(&[
        ".author-name",
        ".byline .name",
        ".byline",
        "[data-testid='author-name']",
        "span[itemprop='name']",
    ]),
];

pub const PUBLISHED_DATE_RULES: &[Rule] = &[
    Rule::Meta(MetaAttr::Property, "article:published_time"),
    Rule::Meta(MetaAttr::Name, "pubdate"),
    Rule::Meta(MetaAttr::Name, "date"),
    Rule::Text(&[
        "time[datetime]",
        "time",
        ".date",
        ".published-date",
        "[data-testid='publish-date']",
    ]),
];

pub const DESCRIPTION_RULES: &[Rule] = &[
    Rule::Meta(MetaAttr::Name, "description"),
    Rule::Meta(MetaAttr::Property, "og:description"),
];

/// Run a cascade and return the first non-empty value.
///
/// # Arguments
///
/// * `document` - The parsed article page
/// * `rules` - Sources for one field, highest priority first
///
/// # Returns
///
/// The value produced by the earliest rule that finds anything, or `None`.
pub fn extract_field(document: &Html, rules: &[Rule]) -> Option<String> {
    rules.iter().enumerate().find_map(|(step, rule)| {
        let value = rule.apply(document)?;
        debug!(step, ?rule, "Cascade step matched");
        Some(value)
    })
}

/// Normalized text of the first element matched by the first matching selector.
///
/// Only the first selector that matches at least one element is consulted. If
/// that element has no text the result is `None`; later selectors are not tried.
pub fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|sel| {
            let selector = parse_selector(sel)?;
            document.select(&selector).next().map(element_text)
        })
        .flatten()
}

/// Normalized `content` of `<meta {attr}="{key}">`.
///
/// Uses the first tag whose attribute equals `key` exactly. A missing or blank
/// `content` on that tag yields `None`.
pub fn meta_content(document: &Html, attr: MetaAttr, key: &str) -> Option<String> {
    let selector = parse_selector("meta")?;
    let tag = document
        .select(&selector)
        .find(|el| el.value().attr(attr.as_str()) == Some(key))?;
    clean(tag.value().attr("content"))
}

/// Elements whose text is code or fallback markup, never article prose.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Visible text of an element, normalized.
///
/// Descendant text nodes are joined with single spaces, skipping any text
/// that sits directly inside `script`, `style`, `template` or `noscript`.
///
/// # Arguments
///
/// * `element` - The element whose subtree is read
///
/// # Returns
///
/// The whitespace-normalized text, or `None` if nothing visible remains.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?;
            let parent = parent.value().as_element()?;
            let hidden = NON_CONTENT_TAGS.iter().any(|tag| *tag == parent.name());
            (!hidden).then_some(&**text)
        })
        .collect::<Vec<_>>()
        .join(" ");
    clean(Some(&text))
}

pub(crate) fn parse_selector(sel: &str) -> Option<Selector> {
    match Selector::parse(sel) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(selector = sel, error = %e, "Skipping unparsable selector");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_all_builtin_selectors_parse() {
        let rule_sets = [
            HEADLINE_RULES,
            AUTHOR_RULES,
            PUBLISHED_DATE_RULES,
            DESCRIPTION_RULES,
        ];
        for rule in rule_sets.iter().flat_map(|rules| rules.iter()) {
            if let Rule::Text(selectors) = rule {
                for sel in *selectors {
                    assert!(Selector::parse(sel).is_ok(), "bad selector {sel}");
                }
            }
        }
    }

    #[test]
    fn test_first_text_normalizes_nested_text() {
        let d = doc("<h1>  Big\n   <em>news</em>  today </h1>");
        assert_eq!(first_text(&d, &["h1"]), Some("Big news today".to_string()));
    }

    #[test]
    fn test_first_text_respects_selector_priority() {
        let d = doc(r#"<div class="byline">By Staff</div><span class="author-name">Jane Roe</span>"#);
        assert_eq!(
            first_text(&d, &[".author-name", ".byline"]),
            Some("Jane Roe".to_string())
        );
        assert_eq!(
            first_text(&d, &[".missing", ".byline"]),
            Some("By Staff".to_string())
        );
    }

    #[test]
    fn test_first_text_stops_at_first_matching_selector() {
        let d = doc(r#"<span class="author-name">   </span><div class="byline">By Staff</div>"#);
        assert_eq!(first_text(&d, &[".author-name", ".byline"]), None);
    }

    #[test]
    fn test_first_text_no_match() {
        let d = doc("<p>nothing here</p>");
        assert_eq!(first_text(&d, &["h1", ".title"]), None);
    }

    #[test]
    fn test_meta_content_by_name_and_property() {
        let d = doc(
            r#"<head>
                <meta name="description" content="  A  short   summary ">
                <meta property="og:title" content="OG Title">
            </head>"#,
        );
        assert_eq!(
            meta_content(&d, MetaAttr::Name, "description"),
            Some("A short summary".to_string())
        );
        assert_eq!(
            meta_content(&d, MetaAttr::Property, "og:title"),
            Some("OG Title".to_string())
        );
        assert_eq!(meta_content(&d, MetaAttr::Name, "og:title"), None);
    }

    #[test]
    fn test_meta_content_blank_or_missing_content() {
        let d = doc(r#"<meta name="author" content="   "><meta name="date">"#);
        assert_eq!(meta_content(&d, MetaAttr::Name, "author"), None);
        assert_eq!(meta_content(&d, MetaAttr::Name, "date"), None);
    }

    #[test]
    fn test_meta_content_uses_first_matching_tag() {
        let d = doc(r#"<meta name="author" content=""><meta name="author" content="Second">"#);
        assert_eq!(meta_content(&d, MetaAttr::Name, "author"), None);
    }

    #[test]
    fn test_headline_prefers_h1_over_og_title() {
        let both = doc(r#"<meta property="og:title" content="OG"><h1>Heading</h1>"#);
        assert_eq!(
            extract_field(&both, HEADLINE_RULES),
            Some("Heading".to_string())
        );

        let og_only = doc(r#"<meta property="og:title" content="OG"><meta name="title" content="T">"#);
        assert_eq!(extract_field(&og_only, HEADLINE_RULES), Some("OG".to_string()));

        let title_only = doc(r#"<meta name="title" content="T">"#);
        assert_eq!(extract_field(&title_only, HEADLINE_RULES), Some("T".to_string()));
    }

    #[test]
    fn test_headline_falls_through_blank_h1() {
        let d = doc(r#"<h1>  </h1><meta property="og:title" content="OG">"#);
        assert_eq!(extract_field(&d, HEADLINE_RULES), Some("OG".to_string()));
    }

    #[test]
    fn test_author_meta_beats_byline() {
        let both = doc(r#"<meta name="author" content="Meta Author"><div class="byline">By Line</div>"#);
        assert_eq!(
            extract_field(&both, AUTHOR_RULES),
            Some("Meta Author".to_string())
        );

        let byline_only = doc(r#"<div class="byline">By Line</div>"#);
        assert_eq!(
            extract_field(&byline_only, AUTHOR_RULES),
            Some("By Line".to_string())
        );

        let article_author = doc(
            r#"<meta property="article:author" content="https://example.com/staff/jane"><div class="byline">By Line</div>"#,
        );
        assert_eq!(
            extract_field(&article_author, AUTHOR_RULES),
            Some("https://example.com/staff/jane".to_string())
        );
    }

    #[test]
    fn test_published_date_cascade() {
        let meta = doc(
            r#"<meta property="article:published_time" content="2025-05-06T14:30:00Z">
               <meta name="date" content="2025-01-01">
               <time datetime="2024-12-31">Dec 31</time>"#,
        );
        assert_eq!(
            extract_field(&meta, PUBLISHED_DATE_RULES),
            Some("2025-05-06T14:30:00Z".to_string())
        );

        let pubdate = doc(r#"<meta name="pubdate" content="20250506"><meta name="date" content="2025-01-01">"#);
        assert_eq!(
            extract_field(&pubdate, PUBLISHED_DATE_RULES),
            Some("20250506".to_string())
        );

        let time_only = doc(r#"<time>Yesterday</time><time datetime="2024-12-31">31 December 2024</time>"#);
        assert_eq!(
            extract_field(&time_only, PUBLISHED_DATE_RULES),
            Some("31 December 2024".to_string())
        );
    }

    #[test]
    fn test_published_date_from_date_meta() {
        let d = doc(r#"<meta name="date" content="2025-01-01"><span class="date">Jan 1</span>"#);
        assert_eq!(
            extract_field(&d, PUBLISHED_DATE_RULES),
            Some("2025-01-01".to_string())
        );
    }

    #[test]
    fn test_time_with_datetime_beats_date_class() {
        let d = doc(
            r#"<span class="date">Updated today</span>
               <time datetime="2024-12-31">31 December 2024</time>"#,
        );
        assert_eq!(
            extract_field(&d, PUBLISHED_DATE_RULES),
            Some("31 December 2024".to_string())
        );
    }

    #[test]
    fn test_first_text_ignores_script_and_style() {
        let d = doc(
            r#"<span class="byline">By Jane<script>track()</script></span>
               <h1><style>h1 { color: red }</style>Headline</h1>"#,
        );
        assert_eq!(first_text(&d, &[".byline"]), Some("By Jane".to_string()));
        assert_eq!(first_text(&d, &["h1"]), Some("Headline".to_string()));
    }

    #[test]
    fn test_script_only_element_is_none() {
        let d = doc(r#"<span class="byline"><script>var author = "x";</script></span>"#);
        assert_eq!(first_text(&d, &[".byline"]), None);
    }

    #[test]
    fn test_description_cascade() {
        let both = doc(r#"<meta property="og:description" content="OG"><meta name="description" content="Plain">"#);
        assert_eq!(
            extract_field(&both, DESCRIPTION_RULES),
            Some("Plain".to_string())
        );

        let og_only = doc(r#"<meta property="og:description" content="OG">"#);
        assert_eq!(extract_field(&og_only, DESCRIPTION_RULES), Some("OG".to_string()));

        assert_eq!(extract_field(&doc("<p>x</p>"), DESCRIPTION_RULES), None);
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let d = doc("<h1>Title</h1>");
        assert_eq!(first_text(&d, &["[[[", "h1"]), Some("Title".to_string()));
    }
}
