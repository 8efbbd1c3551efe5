//! Configuration structures for the extraction engine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CardscanError, Result};

/// Main configuration for cardscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardscanConfig {
    /// Field extraction tuning.
    pub extraction: ExtractionConfig,
}

/// Tunable thresholds of the extraction heuristics.
///
/// The defaults reproduce the reference output; changing them changes which
/// lines get merged, tagged and picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fewest digits a phone candidate may carry.
    pub min_phone_digits: usize,

    /// Most digits a phone candidate may carry.
    pub max_phone_digits: usize,

    /// Share of digits (0.0 - 1.0) a label-stripped line must exceed to be
    /// tagged as a phone line on the bare pattern alone.
    pub phone_digit_density: f32,

    /// Number of leading lines treated as the top of the card.
    pub top_lines: usize,

    /// Share of capitalized-or-short words (0.0 - 1.0) for the loose name check.
    pub name_word_ratio: f32,

    /// Maximum length of a line tagged as a name candidate.
    pub max_name_candidate_len: usize,

    /// Maximum length of a line accepted by the loose name check.
    pub max_loose_name_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_phone_digits: 7,
            max_phone_digits: 15,
            phone_digit_density: 0.4,
            top_lines: 4,
            name_word_ratio: 0.6,
            max_name_candidate_len: 35,
            max_loose_name_len: 40,
        }
    }
}

impl ExtractionConfig {
    /// Check that thresholds are within their meaningful ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_phone_digits > self.max_phone_digits {
            return Err(CardscanError::Config(format!(
                "min_phone_digits ({}) exceeds max_phone_digits ({})",
                self.min_phone_digits, self.max_phone_digits
            )));
        }
        for (name, value) in [
            ("phone_digit_density", self.phone_digit_density),
            ("name_word_ratio", self.name_word_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CardscanError::Config(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        if self.top_lines == 0 {
            return Err(CardscanError::Config("top_lines must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl CardscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()
    }
}
