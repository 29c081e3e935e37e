//! Rendering and extraction of a single article page.
//!
//! The work happens in two phases:
//!
//! 1. **Rendering**: [`browser::fetch`] drives headless Chromium to the page
//!    and returns the serialized DOM
//! 2. **Extraction**: [`article::extract_article`] parses that HTML and runs
//!    the per-field cascades in [`fields`] and the body walk in [`body`]
//!
//! # Field sources
//!
//! | Field | Tried in order |
//! |-------|----------------|
//! | headline | `h1`, `og:title`, `title` meta |
//! | author | `author` meta, `article:author`, byline selectors |
//! | published_date | `article:published_time`, `pubdate`, `date` meta, `time` and date selectors |
//! | description | `description` meta, `og:description` |
//! | body | paragraphs of the first article container, else its whole text |
//!
//! Extraction never fails; a field with no usable source is `None`.

pub mod article;
pub mod body;
pub mod browser;
pub mod fields;
