//! Email address extraction.

use super::patterns::EMAIL;
use super::{ExtractionMatch, FieldExtractor};

/// Email field extractor.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for m in EMAIL.find_iter(text) {
            if results.iter().any(|r| r.value == m.as_str()) {
                continue;
            }
            results.push(
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end()),
            );
        }

        results
    }
}

/// Extract every distinct email address in reading order.
pub fn extract_emails(text: &str) -> Vec<String> {
    EmailExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// The part of an email address before the `@`.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

/// The first label of the domain (`acme` for `jane@acme.co.uk`).
pub fn domain_label(email: &str) -> &str {
    email
        .split_once('@')
        .map(|(_, domain)| domain.split('.').next().unwrap_or_default())
        .unwrap_or_default()
}
