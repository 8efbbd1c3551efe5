//! Website extraction.

use super::patterns::{EMAIL, EMAIL_EXACT, WEBSITE};
use super::{content_lines, ExtractionMatch, FieldExtractor};

/// Website field extractor.
///
/// Works line by line so the domain half of an email address is never
/// reported as a website.
pub struct WebsiteExtractor;

impl WebsiteExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebsiteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for WebsiteExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for line in content_lines(text) {
            if EMAIL_EXACT.is_match(line) {
                continue;
            }

            let without_emails = EMAIL.replace_all(line, "");
            let without_emails = without_emails.trim();
            if without_emails.is_empty() {
                continue;
            }

            for m in WEBSITE.find_iter(without_emails) {
                let url = m.as_str();
                if url.contains('@') || results.iter().any(|r| r.value == url) {
                    continue;
                }
                results.push(ExtractionMatch::new(url.to_string(), line));
            }
        }

        results
    }
}

/// Extract every distinct website in reading order.
pub fn extract_websites(text: &str) -> Vec<String> {
    WebsiteExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
