//! Text helpers shared by the extractors and the console preview.
//!
//! - Whitespace normalization that turns blank text into `None`
//! - Character-safe truncation for previews

/// Normalize a scraped string.
///
/// Collapses every run of whitespace into a single space and trims both ends.
/// Text that is empty after trimming becomes `None`, so callers never store
/// blank strings.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean(Some("  Hello \n\t world ")), Some("Hello world".to_string()));
/// assert_eq!(clean(Some("   ")), None);
/// assert_eq!(clean(None), None);
/// ```
pub fn clean(s: Option<&str>) -> Option<String> {
    let collapsed = s?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Truncate a string to at most `max` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text never splits
/// inside a code point.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_preview("short", 400), "short");
/// assert_eq!(truncate_for_preview("abcdef", 3), "abc...");
/// ```
pub fn truncate_for_preview(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
