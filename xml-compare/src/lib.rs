//! Command-line support for comparing XML documents.
//!
//! The comparison itself lives in `xml-compare-core`; this crate adds
//! option files, terminal rendering, and tree inspection.

pub mod config;
pub mod inspect;
pub mod report;
