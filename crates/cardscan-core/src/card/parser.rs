//! Rule-based business card parser.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::models::card::{BusinessCard, FIELD_SEPARATOR};
use crate::models::config::ExtractionConfig;

use super::classify::{LineClassifier, TaggedLine};
use super::preprocess::LinePreprocessor;
use super::resolve::ResolveContext;
use super::rules::{content_lines, extract_emails, extract_phones, extract_websites};
use super::CardParser;

/// Everything the parser derived from one input.
///
/// Useful when a person corrects the record by hand and wants to see why a
/// line ended up in a field.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// The extracted record.
    pub card: BusinessCard,
    /// Preprocessed lines with their tags, in card order.
    pub lines: Vec<TaggedLine>,
    /// Every distinct email found.
    pub emails: Vec<String>,
    /// Every distinct phone number found.
    pub phones: Vec<String>,
    /// Every distinct website found.
    pub websites: Vec<String>,
}

/// Business card parser built from pattern rules and ordered heuristics.
///
/// The parser holds only immutable tuning, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct BusinessCardParser {
    config: ExtractionConfig,
}

impl BusinessCardParser {
    /// Create a new parser with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom thresholds.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tuning.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse and keep the intermediate lines, tags and extracted values.
    pub fn analyze(&self, text: &str) -> ParseReport {
        info!("Parsing business card from {} characters of text", text.len());

        let lines = content_lines(text);
        let merged = LinePreprocessor::new(&self.config).merge(&lines);
        debug!("Preprocessed {} lines into {}", lines.len(), merged.len());

        let emails = extract_emails(text);
        let phones = extract_phones(text, &merged, &self.config);
        let websites = extract_websites(text);
        debug!(
            "Found {} emails, {} phones, {} websites",
            emails.len(),
            phones.len(),
            websites.len()
        );

        let tagged = LineClassifier::new(&emails, &phones, &self.config).classify_all(&merged);
        for line in &tagged {
            trace!("{} {}", line.tags, line.text);
        }

        let fields = ResolveContext::new(&tagged, &emails, &self.config).resolve();

        let card = BusinessCard {
            name: fields.name,
            job_title: fields.job_title,
            company: fields.company,
            phone: phones.join(FIELD_SEPARATOR),
            email: emails.first().cloned().unwrap_or_default(),
            website: websites.first().cloned().unwrap_or_default(),
            address: fields.address,
            raw_text: text.to_string(),
        };

        debug!("Extracted card for '{}' at '{}'", card.name, card.company);

        ParseReport {
            card,
            lines: tagged,
            emails,
            phones,
            websites,
        }
    }
}

impl CardParser for BusinessCardParser {
    fn parse(&self, text: &str) -> BusinessCard {
        self.analyze(text).card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::classify::LineTag;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> BusinessCard {
        BusinessCardParser::new().parse(text)
    }

    #[test]
    fn test_parse_clean_card() {
        let text = "JANE DOE\n\
                    Senior Software Engineer\n\
                    Acme Solutions Inc.\n\
                    jane.doe@acmesolutions.com\n\
                    (555) 123-4567\n\
                    www.acmesolutions.com\n\
                    123 Main Street, Springfield, IL 62704";

        let card = parse(text);

        assert_eq!(
            card,
            BusinessCard {
                name: "JANE DOE".to_string(),
                job_title: "Senior Software Engineer".to_string(),
                company: "Acme Solutions Inc.".to_string(),
                phone: "(555) 123-4567".to_string(),
                email: "jane.doe@acmesolutions.com".to_string(),
                website: "www.acmesolutions.com".to_string(),
                address: "123 Main Street, Springfield, IL 62704".to_string(),
                raw_text: text.to_string(),
            }
        );
    }

    #[test]
    fn test_parse_split_name() {
        let card = parse("AHMED\nSAYED\nyaharasoftware.com");
        assert_eq!(card.name, "AHMED SAYED");
        assert_eq!(card.website, "yaharasoftware.com");
        assert_eq!(card.company, "");
    }

    #[test]
    fn test_parse_jammed_labeled_phones() {
        let card = parse("CO: (608) 821-1750C: (720) 341-1642");
        assert_eq!(card.phone, "(608) 821-1750, (720) 341-1642");
    }

    #[test]
    fn test_company_from_indicator_line() {
        let card = parse("JANE DOE\nYahara Software\njane@yaharasoftware.com");
        assert_eq!(card.company, "Yahara Software");
        assert_eq!(card.name, "JANE DOE");
        assert_eq!(card.email, "jane@yaharasoftware.com");
        assert_eq!(card.website, "");
    }

    #[test]
    fn test_company_inferred_from_email_domain() {
        let card = parse("Jane Doe\nYahara Digital\njane@yahara.com");
        assert_eq!(card.company, "Yahara Digital");
        assert_eq!(card.name, "Jane Doe");
    }

    #[test]
    fn test_no_structure() {
        let card = parse("???");
        assert_eq!(
            card,
            BusinessCard {
                name: "???".to_string(),
                raw_text: "???".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), BusinessCard::default());

        let blank = "  \n\t\n";
        let card = parse(blank);
        assert!(card.is_empty());
        assert_eq!(card.raw_text, blank);
    }

    #[test]
    fn test_deterministic() {
        let text = "Principal Product\nOwner\nJAMES SMAGALA\nC: (720) 341-1642\n\
                    jsmagala@yaharasoftware.com\n2 Science Ct, Madison, WI 53711";
        let parser = BusinessCardParser::new();
        let first = parser.analyze(text);
        let second = parser.analyze(text);
        assert_eq!(first.card, second.card);
        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn test_split_title_card() {
        let text = "Vice President of\nMarketing\nJAMES SMAGALA\nC: (720) 341-1642\n\
                    jsmagala@yaharasoftware.com\n2 Science Ct, Madison, WI 53711";
        let card = parse(text);
        assert_eq!(card.job_title, "Vice President of Marketing");
        assert_eq!(card.name, "JAMES SMAGALA");
        assert_eq!(card.phone, "(720) 341-1642");
        assert_eq!(card.address, "2 Science Ct, Madison, WI 53711");
    }

    #[test]
    fn test_title_continuation_does_not_become_name() {
        let card = parse("Jane Doe\nSenior Software Engineer\nBackend\njdoe@acme.io");
        assert_eq!(card.name, "Jane Doe");
        assert_eq!(card.job_title, "Senior Software Engineer Backend");

        let card = parse("Senior Software Engineer\nBackend\njdoe@acme.io");
        assert_eq!(card.job_title, "Senior Software Engineer Backend");
        assert_ne!(card.name, "Backend");
    }

    #[test]
    fn test_carriage_return_breaks_lines() {
        let card = parse("AHMED\rSAYED\r\njane@acme.io");
        assert_eq!(card.name, "AHMED SAYED");
        assert_eq!(card.email, "jane@acme.io");
        assert_eq!(card.raw_text, "AHMED\rSAYED\r\njane@acme.io");
    }

    #[test]
    fn test_invariants_hold_for_odd_inputs() {
        let long = "x".repeat(5000);
        let inputs = [
            "",
            "\n\n\n",
            "\r\r",
            "@@@@",
            "a@b",
            "@acme.com",
            "jane@@acme.com",
            "1234567890123456789012345",
            "+++(((555)))---",
            "Tel: Tel: Tel:",
            "ÄÖÜ ßü\nJosé Muñoz\nДиректор\n北京 公司",
            "🙂 emoji 🙂\n📞 555 123 4567",
            "x@y.zz\r\ny@z.ww\rz@w.qq",
            "\t  JANE  \t\n  DOE ",
            "Suite # 12 ### st. st. st.",
            "www.\nhttp://\n.com",
            "CO:CO:C:M:F:O:D:T:",
            "a.b@c.de 1 2 3 4 5 6 7 8 9 0 @ 555-1234",
            long.as_str(),
        ];

        let parser = BusinessCardParser::new();
        for text in inputs {
            let card = parser.parse(text);

            assert_eq!(card, parser.parse(text), "not deterministic for {text:?}");
            assert_eq!(card.raw_text, text);

            let first_email = crate::card::rules::EMAIL
                .find(text)
                .map(|m| m.as_str())
                .unwrap_or_default();
            assert_eq!(card.email, first_email, "email precedence for {text:?}");

            if text.trim().is_empty() {
                assert!(card.is_empty());
            }
        }
    }

    #[test]
    fn test_email_precedence() {
        let card = parse("Contact\nsecond@b.org first?\nfirst@a.com");
        assert_eq!(card.email, "second@b.org");
    }

    #[test]
    fn test_phone_dedup_by_digits() {
        let card = parse("Tel: 555-123-4567\n(555) 123-4567\nFax: 555-765-4321");
        assert_eq!(card.phones(), vec!["555-123-4567", "555-765-4321"]);
    }

    #[test]
    fn test_labels_are_stripped() {
        let card = parse("Jane Doe\nAddress: 42 Elm Avenue\nPhone: 555 123 4567");
        assert_eq!(card.address, "42 Elm Avenue");
        assert_eq!(card.phone, "555 123 4567");
    }

    #[test]
    fn test_report_exposes_tags() {
        let report = BusinessCardParser::new().analyze("AHMED\nSAYED\njane@acme.io");
        assert_eq!(report.lines.len(), 2);
        assert!(report.lines[0].tags.is_only(LineTag::NameCandidate));
        assert!(report.lines[1].tags.is_only(LineTag::Email));
        assert_eq!(report.emails, vec!["jane@acme.io"]);
        assert!(report.phones.is_empty());
    }

    #[test]
    fn test_custom_top_lines() {
        let text = "a\nb\nc\nd\nACME";
        assert_eq!(parse(text).company, "");

        let config = ExtractionConfig {
            top_lines: 5,
            ..Default::default()
        };
        let card = BusinessCardParser::new().with_config(config).parse(text);
        assert_eq!(card.company, "ACME");
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(BusinessCardParser::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.parse("AHMED\nSAYED").name)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "AHMED SAYED");
        }
    }
}
