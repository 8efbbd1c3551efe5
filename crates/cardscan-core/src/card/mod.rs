//! Business card field extraction module.

pub mod classify;
mod parser;
pub mod preprocess;
pub mod resolve;
pub mod rules;

pub use classify::{LineClassifier, LineTag, TagSet, TaggedLine};
pub use parser::{BusinessCardParser, ParseReport};
pub use preprocess::{LinePreprocessor, MergeRule};

use crate::models::card::BusinessCard;

/// Trait for business card parsing.
///
/// Parsing is total: every input, including the empty string, yields a
/// record.
pub trait CardParser {
    /// Parse a business card from recognized text.
    fn parse(&self, text: &str) -> BusinessCard;
}
