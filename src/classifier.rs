/*!
 * Language classification.
 *
 * Combines a `LanguageDetector` guess with a lexical heuristic for romanized
 * Bengali. Statistical detectors routinely report Banglish as English (or
 * some other Latin-script language), so a marker-word hit always wins over
 * the detector.
 */

use std::fmt;

use anyhow::{Result, anyhow};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::app_config::ClassifierConfig;
use crate::detection::LanguageDetector;
use crate::language_utils::{self, BENGALI, ENGLISH};

/// Classification outcome for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLabel {
    English,
    Bengali,
    Banglish,
    Unknown,
}

impl LanguageLabel {
    /// Lowercase label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Bengali => "bengali",
            Self::Banglish => "banglish",
            Self::Unknown => "unknown",
        }
    }

    /// Map a detector code onto a label, ignoring the Banglish heuristic
    pub fn from_detected_code(code: &str) -> Self {
        if language_utils::language_codes_match(code, BENGALI) {
            Self::Bengali
        } else if language_utils::language_codes_match(code, ENGLISH) {
            Self::English
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for LanguageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker pattern used when no configuration is supplied
static DEFAULT_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:ami|tumi|valo|bhalobashi|kemon|acho|tomay)\b").unwrap()
});

/// Whole-word, case-insensitive matcher for romanized Bengali function words
#[derive(Debug, Clone)]
pub struct BanglishHeuristic {
    pattern: Regex,
}

impl BanglishHeuristic {
    /// Build the matcher from a list of marker words
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = markers
            .iter()
            .map(|m| m.as_ref().trim())
            .filter(|m| !m.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Err(anyhow!("Banglish heuristic needs at least one marker word"));
        }

        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
            .map_err(|e| anyhow!("Invalid Banglish marker pattern: {}", e))?;

        Ok(Self { pattern })
    }

    /// True when any marker word occurs in the text
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for BanglishHeuristic {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_MARKER_PATTERN.clone(),
        }
    }
}

/// Produces a `LanguageLabel` for incoming text
#[derive(Debug)]
pub struct LanguageClassifier {
    detector: Box<dyn LanguageDetector>,
    heuristic: BanglishHeuristic,
}

impl LanguageClassifier {
    /// Create a classifier from a detector and a heuristic
    pub fn new(detector: Box<dyn LanguageDetector>, heuristic: BanglishHeuristic) -> Self {
        Self { detector, heuristic }
    }

    /// Create a classifier with markers taken from configuration
    pub fn from_config(detector: Box<dyn LanguageDetector>, config: &ClassifierConfig) -> Result<Self> {
        Ok(Self::new(detector, BanglishHeuristic::new(&config.banglish_markers)?))
    }

    /// Classify non-empty, trimmed text
    ///
    /// Detector failures never propagate: they degrade to `Unknown` unless
    /// the Banglish heuristic fires.
    pub fn classify(&self, text: &str) -> LanguageLabel {
        let base = match self.detector.detect(text) {
            Ok(code) => {
                debug!("Detector guessed '{}'", code);
                LanguageLabel::from_detected_code(&code)
            }
            Err(e) => {
                warn!("Language detection failed, treating as unknown: {}", e);
                LanguageLabel::Unknown
            }
        };

        if self.heuristic.matches(text) {
            debug!("Banglish marker found, overriding detector label '{}'", base);
            return LanguageLabel::Banglish;
        }

        base
    }
}
