use log::warn;
use serde::Serialize;

use crate::classifier::LanguageLabel;

/// Keys of the response report that carry text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportField {
    Original,
    Bengali,
    English,
    Corrected,
    Error,
}

/// JSON reply for one request
///
/// Every field is optional and omitted from the JSON when unset. Fields are
/// write-once: a second write to the same field is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    detected: Option<LanguageLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bengali: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corrected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Fields holding a pass-through value, only when fallback reporting is on
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fallbacks: Vec<ReportField>,
}

impl ResponseReport {
    /// Report carrying only an error message
    pub fn error(message: impl Into<String>) -> Self {
        let mut report = Self::default();
        report.set(ReportField::Error, message);
        report
    }

    /// Report seeded with the classification and the trimmed input
    pub fn seeded(detected: LanguageLabel, original: &str) -> Self {
        let mut report = Self {
            detected: Some(detected),
            ..Default::default()
        };
        report.set(ReportField::Original, original);
        report
    }

    fn slot(&mut self, field: ReportField) -> &mut Option<String> {
        match field {
            ReportField::Original => &mut self.original,
            ReportField::Bengali => &mut self.bengali,
            ReportField::English => &mut self.english,
            ReportField::Corrected => &mut self.corrected,
            ReportField::Error => &mut self.error,
        }
    }

    /// Write a field once; returns false if it was already set
    pub fn set(&mut self, field: ReportField, value: impl Into<String>) -> bool {
        let slot = self.slot(field);
        if slot.is_some() {
            warn!("Report field {:?} already set, keeping the first value", field);
            return false;
        }
        *slot = Some(value.into());
        true
    }

    /// Flag a field as holding a fallback value
    pub fn mark_fallback(&mut self, field: ReportField) {
        if !self.fallbacks.contains(&field) {
            self.fallbacks.push(field);
        }
    }

    pub fn get(&self, field: ReportField) -> Option<&str> {
        match field {
            ReportField::Original => self.original.as_deref(),
            ReportField::Bengali => self.bengali.as_deref(),
            ReportField::English => self.english.as_deref(),
            ReportField::Corrected => self.corrected.as_deref(),
            ReportField::Error => self.error.as_deref(),
        }
    }

    pub fn detected(&self) -> Option<LanguageLabel> {
        self.detected
    }

    pub fn fallbacks(&self) -> &[ReportField] {
        &self.fallbacks
    }
}
