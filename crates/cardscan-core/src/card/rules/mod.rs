//! Rule-based field extractors for business cards.

pub mod email;
pub mod names;
pub mod patterns;
pub mod phone;
pub mod website;

pub use email::{extract_emails, EmailExtractor};
pub use names::{is_single_cap_word, looks_like_name, looks_like_person_name, word_count};
pub use patterns::*;
pub use phone::{extract_phones, PhoneExtractor};
pub use website::{extract_websites, WebsiteExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value pulled out of the text together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Whether an explicit field label introduced the value.
    pub labeled: bool,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            labeled: false,
            position: None,
            source: source.into(),
        }
    }

    pub fn labeled(mut self) -> Self {
        self.labeled = true;
        self
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Keep only the ASCII digits of a value.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove a leading field label such as `Email:` or `Phone.` and trim.
pub fn strip_label(line: &str) -> String {
    LABEL.replace(line, "").trim().to_string()
}

/// Trimmed, non-blank lines of raw text in original order.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
