//! Re-joining of lines that OCR split apart.
//!
//! Names ("AHMED" + "SAYED"), company names ("Yahara g" + "SOFTWARE") and job
//! titles ("Principal Product" + "Owner") often come back from recognition
//! as two lines. A single left-to-right pass looks at each pair of adjacent
//! lines and joins them with a space when one of the merge rules fires.

use tracing::debug;

use super::rules::{
    is_company_line, is_job_title_line, is_single_cap_word, looks_like_person_name, word_count,
    EMAIL, PHONE, WEBSITE,
};
use crate::models::config::ExtractionConfig;

/// Why two lines were merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Two single uppercase words forming a name.
    NameSplit,
    /// A company name and its fragment near the top of the card.
    CompanySplit,
    /// A job title and its continuation.
    JobTitleSplit,
}

/// Line preprocessor.
pub struct LinePreprocessor<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> LinePreprocessor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Merge split lines; never joins more than two lines into one.
    pub fn merge<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut result = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].as_ref();

            if let Some(next) = lines.get(i + 1).map(|s| s.as_ref()) {
                if let Some(rule) = self.merge_rule(line, next, i) {
                    let combined = format!("{line} {next}");
                    debug!("Merged lines {} and {} ({:?}): {}", i, i + 1, rule, combined);
                    result.push(combined);
                    i += 2;
                    continue;
                }
            }

            result.push(line.to_string());
            i += 1;
        }

        result
    }

    /// The first rule that joins `line` with `next`, if any.
    pub fn merge_rule(&self, line: &str, next: &str, position: usize) -> Option<MergeRule> {
        if self.is_name_split(line, next) {
            return Some(MergeRule::NameSplit);
        }
        if position < self.config.top_lines && self.is_company_split(line, next) {
            return Some(MergeRule::CompanySplit);
        }
        if self.is_job_title_split(line, next) {
            return Some(MergeRule::JobTitleSplit);
        }
        None
    }

    fn is_name_split(&self, line: &str, next: &str) -> bool {
        is_single_cap_word(line)
            && is_single_cap_word(next)
            && !is_company_line(line)
            && !is_company_line(next)
            && !is_job_title_line(line)
            && !is_job_title_line(next)
    }

    fn is_company_split(&self, line: &str, next: &str) -> bool {
        match (is_company_line(line), is_company_line(next)) {
            (false, true) => word_count(next) <= 2 && self.is_fragment(line),
            (true, false) => {
                word_count(line) <= 2 && word_count(next) <= 2 && self.is_fragment(next)
            }
            _ => false,
        }
    }

    fn is_job_title_split(&self, line: &str, next: &str) -> bool {
        // Exactly one side carries the title keyword, the other continues it
        let continuation = match (is_job_title_line(line), is_job_title_line(next)) {
            (true, false) => next,
            (false, true) => line,
            _ => return false,
        };

        if word_count(line) > 3 || word_count(next) > 3 {
            return false;
        }
        if EMAIL.is_match(next) || PHONE.is_match(next) {
            return false;
        }
        if !next
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '/')
        {
            return false;
        }
        if is_company_line(continuation) || looks_like_person_name(continuation, self.config) {
            return false;
        }

        is_job_title_line(&format!("{line} {next}"))
    }

    /// A short piece of text that can only be part of a longer line.
    fn is_fragment(&self, text: &str) -> bool {
        !looks_like_person_name(text, self.config)
            && !text.contains('@')
            && !text.chars().any(|c| c.is_ascii_digit())
            && !WEBSITE.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn preprocess_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
        LinePreprocessor::new(&ExtractionConfig::default()).merge(lines)
    }

    #[test]
    fn test_merges_split_name() {
        assert_eq!(
            preprocess_lines(&["AHMED", "SAYED", "yaharasoftware.com"]),
            vec!["AHMED SAYED", "yaharasoftware.com"]
        );
    }

    #[test]
    fn test_merges_split_company_at_top() {
        assert_eq!(
            preprocess_lines(&["Yahara g", "SOFTWARE", "James Smagala"]),
            vec!["Yahara g SOFTWARE", "James Smagala"]
        );
    }

    #[test]
    fn test_company_merge_limited_to_top_lines() {
        let lines = ["a", "b", "c", "d", "e", "Yahara g", "SOFTWARE"];
        let merged = preprocess_lines(&lines);
        assert_eq!(merged.len(), lines.len());
    }

    #[test]
    fn test_company_not_merged_with_person_or_email() {
        assert_eq!(
            preprocess_lines(&["JANE DOE", "Yahara Software", "jane@yaharasoftware.com"]),
            vec!["JANE DOE", "Yahara Software", "jane@yaharasoftware.com"]
        );
    }

    #[test]
    fn test_merges_split_job_title() {
        assert_eq!(
            preprocess_lines(&["Vice President of", "Marketing", "jsmith@example.org"]),
            vec!["Vice President of Marketing", "jsmith@example.org"]
        );
        assert_eq!(
            preprocess_lines(&["Customer", "Success Manager"]),
            vec!["Customer Success Manager"]
        );
    }

    #[test]
    fn test_title_with_company_word_still_merges() {
        assert_eq!(
            preprocess_lines(&["Senior Software Engineer", "Backend"]),
            vec!["Senior Software Engineer Backend"]
        );
    }

    #[test]
    fn test_two_title_lines_stay_apart() {
        assert_eq!(
            preprocess_lines(&["Principal Product", "Owner"]),
            vec!["Principal Product", "Owner"]
        );
    }

    #[test]
    fn test_title_not_merged_with_name() {
        let lines = [
            "JANE DOE",
            "Senior Software Engineer",
            "Acme Solutions Inc.",
        ];
        assert_eq!(preprocess_lines(&lines), lines.to_vec());
        assert_eq!(
            preprocess_lines(&["Jane Doe", "Marketing Director"]),
            vec!["Jane Doe", "Marketing Director"]
        );
    }

    #[test]
    fn test_never_merges_three_lines() {
        assert_eq!(
            preprocess_lines(&["AHMED", "SAYED", "MAHMOUD"]),
            vec!["AHMED SAYED", "MAHMOUD"]
        );
    }

    #[test]
    fn test_merge_rule_priority() {
        let config = ExtractionConfig::default();
        let pre = LinePreprocessor::new(&config);
        assert_eq!(pre.merge_rule("AHMED", "SAYED", 0), Some(MergeRule::NameSplit));
        assert_eq!(pre.merge_rule("ACME", "LLC", 0), Some(MergeRule::CompanySplit));
        assert_eq!(
            pre.merge_rule("Yahara g", "SOFTWARE", 0),
            Some(MergeRule::CompanySplit)
        );
        assert_eq!(pre.merge_rule("Yahara g", "SOFTWARE", 4), None);
        assert_eq!(
            pre.merge_rule("Chief Technology", "Officer", 5),
            None
        );
        // continuation carrying a company word below the top of the card
        assert_eq!(pre.merge_rule("Lead", "Financial Planning", 5), None);
        assert_eq!(
            pre.merge_rule("Senior Software Engineer", "Backend", 5),
            Some(MergeRule::JobTitleSplit)
        );
    }

    #[test]
    fn test_short_input() {
        assert!(preprocess_lines::<&str>(&[]).is_empty());
        assert_eq!(preprocess_lines(&["only"]), vec!["only"]);
    }
}
