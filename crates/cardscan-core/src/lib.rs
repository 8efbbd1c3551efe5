//! Core library for business card OCR text extraction.
//!
//! This crate provides:
//! - Line preprocessing that re-joins names, companies and titles split by OCR
//! - Global extraction of emails, phone numbers and websites
//! - Per-line classification into overlapping semantic tags
//! - Ordered per-field resolution of name, job title, company and address
//!
//! The engine consumes text that an external recognizer already produced and
//! never performs I/O of its own.

pub mod card;
pub mod error;
pub mod models;

pub use card::{BusinessCardParser, CardParser, LineTag, ParseReport, TagSet, TaggedLine};
pub use error::{CardscanError, Result};
pub use models::card::BusinessCard;
pub use models::config::{CardscanConfig, ExtractionConfig};

/// Parse raw business card text with the default tuning.
pub fn parse(raw_text: &str) -> BusinessCard {
    BusinessCardParser::new().parse(raw_text)
}
