/*!
 * Language detection.
 *
 * The classifier only needs a best-effort ISO 639 guess for a piece of text.
 * `LanguageDetector` is the seam for plugging in any detector.
 *
 * - `ScriptDetector` guesses from the dominant Unicode script. Every Latin
 *   text comes out as English.
 * - `TrigramDetector` keeps the script answer for non-Latin text and asks
 *   `whatlang` about Latin text, so French or Spanish input is not mistaken
 *   for English. Short Latin snippets whatlang is unsure about stay English.
 *
 * Romanized Bengali looks like Latin text to both, which is why the
 * classifier layers a lexical heuristic on top.
 */

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt::Debug;

use log::trace;

use crate::errors::DetectionError;

/// A best-effort language identifier
pub trait LanguageDetector: Send + Sync + Debug {
    /// Return an ISO 639 code for `text`
    fn detect(&self, text: &str) -> Result<String, DetectionError>;
}

/// Writing systems the script detector can tell apart
///
/// Declaration order breaks ties between equally common scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Script {
    Latin,
    Bengali,
    Devanagari,
    Gurmukhi,
    Gujarati,
    Odia,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Arabic,
    Other,
}

impl Script {
    /// Map a character to its script based on Unicode range
    pub fn of(c: char) -> Script {
        match c as u32 {
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F => Script::Latin,
            0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF => Script::Arabic,
            0x0900..=0x097F | 0xA8E0..=0xA8FF => Script::Devanagari,
            0x0980..=0x09FF => Script::Bengali,
            0x0A00..=0x0A7F => Script::Gurmukhi,
            0x0A80..=0x0AFF => Script::Gujarati,
            0x0B00..=0x0B7F => Script::Odia,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0C00..=0x0C7F => Script::Telugu,
            0x0C80..=0x0CFF => Script::Kannada,
            0x0D00..=0x0D7F => Script::Malayalam,
            _ => Script::Other,
        }
    }

    /// ISO 639-1 code of the language this script most likely carries
    fn language_code(self) -> Option<&'static str> {
        match self {
            Script::Latin => Some("en"),
            Script::Bengali => Some("bn"),
            Script::Devanagari => Some("hi"),
            Script::Gurmukhi => Some("pa"),
            Script::Gujarati => Some("gu"),
            Script::Odia => Some("or"),
            Script::Tamil => Some("ta"),
            Script::Telugu => Some("te"),
            Script::Kannada => Some("kn"),
            Script::Malayalam => Some("ml"),
            Script::Arabic => Some("ur"),
            Script::Other => None,
        }
    }
}

/// Script-based language detector
#[derive(Debug, Clone, Default)]
pub struct ScriptDetector;

impl ScriptDetector {
    /// Create a new script detector
    pub fn new() -> Self {
        Self
    }

    /// Detect the dominant script in text, ignoring anything that isn't a letter
    pub fn dominant_script(&self, text: &str) -> Option<Script> {
        let mut counts: BTreeMap<Script, usize> = BTreeMap::new();

        for c in text.chars().filter(|c| c.is_alphabetic() || is_combining_mark(*c)) {
            *counts.entry(Script::of(c)).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .max_by_key(|&(script, count)| (count, script == Script::Bengali, Reverse(script)))
            .map(|(script, _)| script)
    }
}

/// Indic vowel signs and viramas are marks, not alphabetic characters
fn is_combining_mark(c: char) -> bool {
    matches!(Script::of(c), Script::Bengali | Script::Devanagari)
}

fn script_language(script: Script) -> Result<String, DetectionError> {
    script
        .language_code()
        .map(str::to_string)
        .ok_or_else(|| DetectionError::Failed(format!("unsupported script {:?}", script)))
}

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let script = self.dominant_script(text).ok_or(DetectionError::NoFeatures)?;
        script_language(script)
    }
}

/// Script detection refined by whatlang's trigram model for Latin text
///
/// Returns ISO 639-3 codes (`eng`, `fra`, ...) when whatlang is reliable,
/// otherwise the script guess.
#[derive(Debug, Clone, Default)]
pub struct TrigramDetector {
    scripts: ScriptDetector,
}

impl TrigramDetector {
    /// Create a new trigram detector
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageDetector for TrigramDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionError> {
        let script = self.scripts.dominant_script(text).ok_or(DetectionError::NoFeatures)?;
        if script != Script::Latin {
            return script_language(script);
        }

        match whatlang::detect(text) {
            Some(info) if info.is_reliable() => Ok(info.lang().code().to_string()),
            Some(info) => {
                trace!(
                    "whatlang unsure ({} at {:.2}), keeping script guess",
                    info.lang().code(),
                    info.confidence()
                );
                script_language(script)
            }
            None => script_language(script),
        }
    }
}
