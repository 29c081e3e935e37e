//! Output writers for the extracted record.
//!
//! # Submodules
//!
//! - [`json`]: Pretty-printed JSON object, `null` for absent fields
//! - [`csv`]: Header plus one data row, empty cells for absent fields
//!
//! Both writers replace their target file and propagate any I/O error.

pub mod csv;
pub mod json;
