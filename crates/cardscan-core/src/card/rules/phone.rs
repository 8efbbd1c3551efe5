//! Phone number extraction.
//!
//! Labeled numbers ("Tel:", "C:", "CO:") are collected from the whole text
//! first, since OCR often glues a label to the previous number. Bare numbers
//! are then collected line by line. Numbers are de-duplicated on their
//! digits, so `555-123-4567` and `(555) 123-4567` count once.

use super::patterns::{EMAIL, LABELED_PHONE, PHONE};
use super::{content_lines, digits_only, ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Phone field extractor.
pub struct PhoneExtractor {
    min_digits: usize,
    max_digits: usize,
}

impl PhoneExtractor {
    /// Create a new phone extractor with the default digit range.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a phone extractor using the configured digit range.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_digits: config.min_phone_digits,
            max_digits: config.max_phone_digits,
        }
    }

    /// Set the accepted digit count range.
    pub fn with_digit_range(mut self, min: usize, max: usize) -> Self {
        self.min_digits = min;
        self.max_digits = max;
        self
    }

    fn accepts(&self, digits: &str) -> bool {
        (self.min_digits..=self.max_digits).contains(&digits.len())
    }

    /// Extract phones from raw text, scanning `lines` for unlabeled numbers.
    ///
    /// `lines` are normally the preprocessed lines of `text`.
    pub fn extract_from<S: AsRef<str>>(
        &self,
        text: &str,
        lines: &[S],
    ) -> Vec<ExtractionMatch<String>> {
        let mut results: Vec<ExtractionMatch<String>> = Vec::new();
        let mut seen_digits: Vec<String> = Vec::new();

        for caps in LABELED_PHONE.captures_iter(text) {
            let Some(number) = caps.get(1) else { continue };
            let phone = number.as_str().trim();
            let digits = digits_only(phone);

            if !self.accepts(&digits) || seen_digits.contains(&digits) {
                continue;
            }

            seen_digits.push(digits);
            results.push(
                ExtractionMatch::new(phone.to_string(), &caps[0])
                    .labeled()
                    .with_position(number.start(), number.end()),
            );
        }

        for line in lines {
            let line = line.as_ref();

            // Digits inside an email address are not a phone number
            if EMAIL.is_match(line) && !PHONE.is_match(&EMAIL.replace_all(line, "")) {
                continue;
            }

            for m in PHONE.find_iter(line) {
                let phone = m.as_str().trim();
                let digits = digits_only(phone);

                if !self.accepts(&digits) || seen_digits.contains(&digits) {
                    continue;
                }

                seen_digits.push(digits);
                results.push(ExtractionMatch::new(phone.to_string(), line));
            }
        }

        results
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract_from(text, &content_lines(text))
    }
}

/// Extract every distinct phone number, labeled ones first.
pub fn extract_phones<S: AsRef<str>>(
    text: &str,
    lines: &[S],
    config: &ExtractionConfig,
) -> Vec<String> {
    PhoneExtractor::from_config(config)
        .extract_from(text, lines)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
