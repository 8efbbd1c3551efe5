//! The structured record extracted from a business card.

use serde::{Deserialize, Serialize};

/// Separator used when a field aggregates several matches.
pub const FIELD_SEPARATOR: &str = ", ";

/// Contact fields extracted from one scanned business card.
///
/// Every field is a plain string; a field with no supporting evidence is
/// empty rather than absent, so consumers get a uniform shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCard {
    /// Person name.
    pub name: String,

    /// Job title.
    pub job_title: String,

    /// Company or organization name.
    pub company: String,

    /// One or more phone numbers joined by `", "`.
    pub phone: String,

    /// First email address found.
    pub email: String,

    /// First website found.
    pub website: String,

    /// Address lines joined by `", "`.
    pub address: String,

    /// The input text, unchanged.
    pub raw_text: String,
}

impl BusinessCard {
    /// Check whether no contact field was extracted.
    ///
    /// The raw text is not a contact field and does not count.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.job_title.is_empty()
            && self.company.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
            && self.website.is_empty()
            && self.address.is_empty()
    }

    /// Individual phone numbers from the joined phone field.
    pub fn phones(&self) -> Vec<&str> {
        self.phone
            .split(FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Field names and values in display order, raw text excluded.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("name", &self.name),
            ("job_title", &self.job_title),
            ("company", &self.company),
            ("phone", &self.phone),
            ("email", &self.email),
            ("website", &self.website),
            ("address", &self.address),
        ]
    }
}
