//! Line classification into overlapping semantic tags.

use serde::{Serialize, Serializer};
use std::fmt;

use super::rules::{
    digits_only, is_address_line, is_company_line, is_job_title_line, looks_like_person_name,
    strip_label, EMAIL, LABELED_PHONE, PHONE, WEBSITE,
};
use crate::models::config::ExtractionConfig;

/// Semantic tag assigned to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineTag {
    Email,
    Phone,
    Website,
    Address,
    JobTitle,
    Company,
    /// Looks like a person name and nothing else.
    NameCandidate,
    /// No evidence for any field.
    Unknown,
}

impl LineTag {
    pub const ALL: [LineTag; 8] = [
        LineTag::Email,
        LineTag::Phone,
        LineTag::Website,
        LineTag::Address,
        LineTag::JobTitle,
        LineTag::Company,
        LineTag::NameCandidate,
        LineTag::Unknown,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineTag::Email => "EMAIL",
            LineTag::Phone => "PHONE",
            LineTag::Website => "WEBSITE",
            LineTag::Address => "ADDRESS",
            LineTag::JobTitle => "JOB_TITLE",
            LineTag::Company => "COMPANY",
            LineTag::NameCandidate => "NAME_CANDIDATE",
            LineTag::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for LineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of line tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TagSet(u8);

impl TagSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, tag: LineTag) {
        self.0 |= tag.bit();
    }

    pub fn with(mut self, tag: LineTag) -> Self {
        self.insert(tag);
        self
    }

    pub fn contains(&self, tag: LineTag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// True when any of `tags` is present.
    pub fn contains_any(&self, tags: &[LineTag]) -> bool {
        tags.iter().any(|t| self.contains(*t))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// No tag carries evidence for a field.
    pub fn is_untagged(&self) -> bool {
        self.is_empty() || *self == TagSet::new().with(LineTag::Unknown)
    }

    /// Whether `tag` is the only tag in the set.
    pub fn is_only(&self, tag: LineTag) -> bool {
        self.0 == tag.bit()
    }

    pub fn iter(&self) -> impl Iterator<Item = LineTag> {
        let set = *self;
        LineTag::ALL.into_iter().filter(move |t| set.contains(*t))
    }
}

impl FromIterator<LineTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = LineTag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|t| t.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A preprocessed line and its tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedLine {
    pub text: String,
    pub tags: TagSet,
}

impl TaggedLine {
    pub fn has(&self, tag: LineTag) -> bool {
        self.tags.contains(tag)
    }
}

/// Tags lines using the pattern library and the globally extracted values.
pub struct LineClassifier<'a> {
    emails: &'a [String],
    phones: &'a [String],
    config: &'a ExtractionConfig,
}

impl<'a> LineClassifier<'a> {
    pub fn new(emails: &'a [String], phones: &'a [String], config: &'a ExtractionConfig) -> Self {
        Self {
            emails,
            phones,
            config,
        }
    }

    /// Tag a single line.
    pub fn classify(&self, line: &str) -> TagSet {
        let mut tags = TagSet::new();

        if EMAIL.is_match(line) {
            tags.insert(LineTag::Email);
        }
        if self.is_phone_line(line) {
            tags.insert(LineTag::Phone);
        }
        if self.is_website_line(line) {
            tags.insert(LineTag::Website);
        }
        if is_address_line(line) {
            tags.insert(LineTag::Address);
        }
        if is_job_title_line(line) {
            tags.insert(LineTag::JobTitle);
        }
        if is_company_line(line) {
            tags.insert(LineTag::Company);
        }

        if tags.is_empty() {
            if looks_like_person_name(line, self.config) {
                tags.insert(LineTag::NameCandidate);
            } else {
                tags.insert(LineTag::Unknown);
            }
        }

        tags
    }

    /// Tag every line in order.
    pub fn classify_all<S: AsRef<str>>(&self, lines: &[S]) -> Vec<TaggedLine> {
        lines
            .iter()
            .map(|line| {
                let text = line.as_ref();
                TaggedLine {
                    text: text.to_string(),
                    tags: self.classify(text),
                }
            })
            .collect()
    }

    fn is_phone_line(&self, line: &str) -> bool {
        if self.phones.iter().any(|p| line.contains(p.as_str())) {
            return true;
        }
        if LABELED_PHONE.is_match(line) {
            return true;
        }

        // An incidental number is not enough, digits must dominate
        let stripped = strip_label(line);
        if PHONE.is_match(&stripped) {
            let total = stripped.chars().count();
            let digits = digits_only(&stripped).len();
            return total > 0 && digits as f32 / total as f32 > self.config.phone_digit_density;
        }
        false
    }

    fn is_website_line(&self, line: &str) -> bool {
        if EMAIL.is_match(line) {
            let without_emails = self
                .emails
                .iter()
                .fold(line.to_string(), |acc, email| acc.replace(email.as_str(), ""));
            return WEBSITE.is_match(&without_emails);
        }
        WEBSITE.is_match(line) && !line.contains('@')
    }
}
