//! Shape checks for person names.

use super::patterns::{is_company_line, is_job_title_line};
use crate::models::config::ExtractionConfig;

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A single all-uppercase word made only of letters ("AHMED").
pub fn is_single_cap_word(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && !trimmed.contains(char::is_whitespace)
        && trimmed == trimmed.to_uppercase()
        && trimmed != trimmed.to_lowercase()
        && trimmed.chars().all(char::is_alphabetic)
}

/// Strict person-name shape used for tagging name candidates.
///
/// 2-4 words, each capitalized and made of letters, hyphens, apostrophes or
/// periods, within the length limit and free of company and title keywords.
pub fn looks_like_person_name(text: &str, config: &ExtractionConfig) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }

    let all_name_like = words.iter().all(|word| {
        word.chars().next().is_some_and(char::is_uppercase)
            && word
                .chars()
                .all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '.')
    });
    if !all_name_like {
        return false;
    }

    if text.chars().count() > config.max_name_candidate_len {
        return false;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    !is_company_line(text) && !is_job_title_line(text)
}

/// Loose name shape used when no line was tagged as a name candidate.
pub fn looks_like_name(text: &str, config: &ExtractionConfig) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if !(1..=5).contains(&words.len()) {
        return false;
    }

    let name_words = words
        .iter()
        .filter(|word| {
            let len = word.chars().count();
            let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
            let letters = word
                .chars()
                .filter(|c| c.is_alphabetic() || *c == '-' || *c == '\'')
                .count();
            (starts_upper || len <= 3) && letters as f32 >= len as f32 * 0.7
        })
        .count();
    if (name_words as f32) < words.len() as f32 * config.name_word_ratio {
        return false;
    }

    if text.chars().count() > config.max_loose_name_len {
        return false;
    }

    text.chars().filter(|c| c.is_ascii_digit()).count() <= 1
}
