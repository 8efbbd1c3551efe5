//! Per-field resolution over tagged lines.
//!
//! Each field is resolved by an ordered list of heuristics. The first
//! heuristic that produces a non-empty value wins; when none does the field
//! stays empty. Job title and company are resolved first because the later
//! heuristics must not hand the same line to a second field.

use tracing::debug;

use super::classify::{LineTag, TaggedLine};
use super::rules::email::{domain_label, local_part};
use super::rules::{looks_like_name, strip_label};
use crate::models::card::FIELD_SEPARATOR;
use crate::models::config::ExtractionConfig;

/// Tags that mark a line as contact data rather than a name or title.
const CONTACT_TAGS: [LineTag; 4] = [
    LineTag::Email,
    LineTag::Phone,
    LineTag::Website,
    LineTag::Address,
];

/// What a heuristic can see: the tagged lines and the fields resolved so far.
pub struct ResolveContext<'a> {
    pub lines: &'a [TaggedLine],
    pub emails: &'a [String],
    pub config: &'a ExtractionConfig,
    pub job_title: String,
    pub company: String,
}

/// A single resolution strategy.
pub type Heuristic = for<'c> fn(&ResolveContext<'c>) -> Option<String>;

pub const JOB_TITLE_HEURISTICS: &[(&str, Heuristic)] = &[
    ("title-only line", job_title_only_line),
    ("first title line", job_title_first_line),
];

pub const COMPANY_HEURISTICS: &[(&str, Heuristic)] = &[
    ("company-only line", company_only_line),
    ("email domain", company_from_email_domain),
    ("uppercase line near top", company_uppercase_near_top),
];

pub const NAME_HEURISTICS: &[(&str, Heuristic)] = &[
    ("name candidate", name_candidate),
    ("untagged name-like line", name_untagged_line),
    ("email local part", name_from_email),
    ("first non-contact line", name_first_non_contact_line),
    ("first line", name_first_line),
];

/// Resolved name, job title, company and address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub address: String,
}

impl<'a> ResolveContext<'a> {
    pub fn new(lines: &'a [TaggedLine], emails: &'a [String], config: &'a ExtractionConfig) -> Self {
        Self {
            lines,
            emails,
            config,
            job_title: String::new(),
            company: String::new(),
        }
    }

    /// Whether `text` was already taken by the job title or company.
    fn is_taken(&self, text: &str) -> bool {
        text == self.job_title || text == self.company
    }

    fn top_lines(&self) -> &'a [TaggedLine] {
        &self.lines[..self.lines.len().min(self.config.top_lines)]
    }

    /// Run heuristics in order and return the first non-empty value.
    pub fn run(&self, field: &str, heuristics: &[(&str, Heuristic)]) -> String {
        for (name, heuristic) in heuristics {
            if let Some(value) = heuristic(self).filter(|v| !v.is_empty()) {
                debug!("Resolved {} via {}: {}", field, name, value);
                return value;
            }
        }
        debug!("No value for {}", field);
        String::new()
    }

    /// Resolve all fields in dependency order.
    pub fn resolve(mut self) -> ResolvedFields {
        self.job_title = self.run("job title", JOB_TITLE_HEURISTICS);
        self.company = self.run("company", COMPANY_HEURISTICS);
        let address = resolve_address(self.lines);
        let name = self.run("name", NAME_HEURISTICS);

        ResolvedFields {
            name,
            job_title: self.job_title,
            company: self.company,
            address,
        }
    }
}

/// Join every address line that is not an email or website line.
pub fn resolve_address(lines: &[TaggedLine]) -> String {
    lines
        .iter()
        .filter(|l| l.has(LineTag::Address) && !l.has(LineTag::Email) && !l.has(LineTag::Website))
        .map(|l| strip_label(&l.text))
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

fn job_title_only_line(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .find(|l| l.tags.is_only(LineTag::JobTitle))
        .map(|l| strip_label(&l.text))
}

fn job_title_first_line(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .find(|l| l.has(LineTag::JobTitle))
        .map(|l| strip_label(&l.text))
}

fn company_only_line(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .find(|l| {
            l.has(LineTag::Company)
                && !l.tags.contains_any(&CONTACT_TAGS)
                && l.text != ctx.job_title
        })
        .map(|l| strip_label(&l.text))
}

fn company_from_email_domain(ctx: &ResolveContext<'_>) -> Option<String> {
    let email = ctx.emails.first()?;
    let domain = domain_label(email).to_lowercase();
    if domain.is_empty() {
        return None;
    }

    ctx.top_lines()
        .iter()
        .find(|l| {
            l.text.to_lowercase().contains(&domain)
                && !l.tags.contains_any(&[LineTag::Email, LineTag::Phone, LineTag::Website])
                && l.text != ctx.job_title
        })
        .map(|l| strip_label(&l.text))
}

fn company_uppercase_near_top(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.top_lines()
        .iter()
        .find(|l| {
            l.text.chars().count() > 2
                && l.text == l.text.to_uppercase()
                && l.text != l.text.to_lowercase()
                && !l.tags.contains_any(&CONTACT_TAGS)
                && !l.has(LineTag::NameCandidate)
                && l.text != ctx.job_title
        })
        .map(|l| l.text.clone())
}

fn name_candidate(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .find(|l| l.has(LineTag::NameCandidate) && !ctx.is_taken(&l.text))
        .map(|l| l.text.clone())
}

fn name_untagged_line(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .filter(|l| l.tags.is_untagged() && !ctx.is_taken(&l.text))
        .map(|l| strip_label(&l.text))
        .find(|stripped| looks_like_name(stripped, ctx.config))
}

fn name_from_email(ctx: &ResolveContext<'_>) -> Option<String> {
    for email in ctx.emails {
        let parts: Vec<String> = local_part(email)
            .split(['.', '_', '-'])
            .filter(|p| p.chars().count() > 1)
            .map(str::to_lowercase)
            .collect();
        if parts.is_empty() {
            continue;
        }

        let found = non_contact_lines(ctx).find(|l| {
            let lower = l.text.to_lowercase();
            parts.iter().any(|part| lower.contains(part.as_str()))
        });
        if let Some(line) = found {
            return Some(line.text.clone());
        }
    }
    None
}

fn name_first_non_contact_line(ctx: &ResolveContext<'_>) -> Option<String> {
    non_contact_lines(ctx).next().map(|l| l.text.clone())
}

fn name_first_line(ctx: &ResolveContext<'_>) -> Option<String> {
    ctx.lines.first().map(|l| l.text.clone())
}

fn non_contact_lines<'c>(ctx: &'c ResolveContext<'_>) -> impl Iterator<Item = &'c TaggedLine> {
    ctx.lines
        .iter()
        .filter(move |l| !l.tags.contains_any(&CONTACT_TAGS) && !ctx.is_taken(&l.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::classify::TagSet;

    fn line(text: &str, tags: &[LineTag]) -> TaggedLine {
        TaggedLine {
            text: text.to_string(),
            tags: tags.iter().copied().collect::<TagSet>(),
        }
    }

    fn resolve(lines: &[TaggedLine], emails: &[&str]) -> ResolvedFields {
        let emails: Vec<String> = emails.iter().map(|s| s.to_string()).collect();
        let config = ExtractionConfig::default();
        ResolveContext::new(lines, &emails, &config).resolve()
    }

    #[test]
    fn test_job_title_prefers_title_only_line() {
        let lines = [
            line("Software Engineering Group", &[LineTag::JobTitle, LineTag::Company]),
            line("Lead Engineer", &[LineTag::JobTitle]),
        ];
        assert_eq!(resolve(&lines, &[]).job_title, "Lead Engineer");
    }

    #[test]
    fn test_job_title_falls_back_to_first_title_line() {
        let lines = [line(
            "Senior Software Engineer",
            &[LineTag::JobTitle, LineTag::Company],
        )];
        let fields = resolve(&lines, &[]);
        assert_eq!(fields.job_title, "Senior Software Engineer");
        // the same line must not also become the company
        assert_eq!(fields.company, "");
    }

    #[test]
    fn test_company_from_email_domain() {
        let lines = [
            line("Jane Doe", &[LineTag::NameCandidate]),
            line("Yahara Digital", &[LineTag::NameCandidate]),
            line("jane@yahara.com", &[LineTag::Email]),
        ];
        let fields = resolve(&lines, &["jane@yahara.com"]);
        assert_eq!(fields.company, "Yahara Digital");
        assert_eq!(fields.name, "Jane Doe");
    }

    #[test]
    fn test_company_uppercase_near_top() {
        let lines = [
            line("Jane Doe", &[LineTag::NameCandidate]),
            line("ACME", &[LineTag::Unknown]),
        ];
        assert_eq!(resolve(&lines, &[]).company, "ACME");
    }

    #[test]
    fn test_company_uppercase_outside_top_is_ignored() {
        let lines = [
            line("a", &[LineTag::Unknown]),
            line("b", &[LineTag::Unknown]),
            line("c", &[LineTag::Unknown]),
            line("d", &[LineTag::Unknown]),
            line("ACME", &[LineTag::Unknown]),
        ];
        assert_eq!(resolve(&lines, &[]).company, "");
    }

    #[test]
    fn test_address_joins_lines_and_skips_email() {
        let lines = [
            line("Address: 123 Main Street", &[LineTag::Address]),
            line("jane@mainst.com", &[LineTag::Email, LineTag::Address]),
            line("Springfield, IL 62704", &[LineTag::Address]),
        ];
        assert_eq!(
            resolve(&lines, &[]).address,
            "123 Main Street, Springfield, IL 62704"
        );
    }

    #[test]
    fn test_name_from_untagged_line() {
        let lines = [
            line("ACME", &[LineTag::Unknown]),
            line("jdoe@acme.com", &[LineTag::Email]),
            line("Jane", &[LineTag::Unknown]),
        ];
        let fields = resolve(&lines, &["jdoe@acme.com"]);
        assert_eq!(fields.company, "ACME");
        assert_eq!(fields.name, "Jane");
    }

    #[test]
    fn test_name_from_email_local_part() {
        let lines = [
            line("Cloud Architect", &[LineTag::JobTitle]),
            line("dr smagala", &[LineTag::Address]),
            line("notes: smagala 2024 q3 #12", &[LineTag::Unknown]),
            line("james.smagala@yahara.com", &[LineTag::Email]),
        ];
        let fields = resolve(&lines, &["james.smagala@yahara.com"]);
        assert_eq!(fields.name, "notes: smagala 2024 q3 #12");
    }

    #[test]
    fn test_name_last_resort() {
        let lines = [line("???", &[LineTag::Unknown])];
        assert_eq!(resolve(&lines, &[]).name, "???");

        let lines = [line("555-123-4567", &[LineTag::Phone])];
        assert_eq!(resolve(&lines, &[]).name, "555-123-4567");

        assert_eq!(resolve(&[], &[]), ResolvedFields::default());
    }

    #[test]
    fn test_heuristic_order_is_fixed() {
        let names: Vec<&str> = NAME_HEURISTICS.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.first(), Some(&"name candidate"));
        assert_eq!(names.last(), Some(&"first line"));
    }
}
