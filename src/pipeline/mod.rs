/*!
 * Request pipeline: planning and executing the model calls for one request.
 *
 * - `selector`: pure mapping from a language label to an ordered plan
 * - `report`: the response report and its write-once fields
 * - `orchestrator`: validation, classification, step execution
 */

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod orchestrator;
pub mod report;
pub mod selector;

pub use self::orchestrator::{HandleStatus, Orchestrator};
pub use self::report::{ReportField, ResponseReport};
pub use self::selector::select;

/// The four capabilities the model gateway exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Banglish (Latin script) to Bengali script
    Transliterate,
    /// English grammar correction
    GrammarCorrect,
    /// English to Bengali translation
    TranslateEnToBn,
    /// Bengali to English translation
    TranslateBnToEn,
}

impl Capability {
    /// Report key the output of this capability is written under
    pub fn report_field(&self) -> ReportField {
        match self {
            Self::Transliterate | Self::TranslateEnToBn => ReportField::Bengali,
            Self::GrammarCorrect => ReportField::Corrected,
            Self::TranslateBnToEn => ReportField::English,
        }
    }

    /// Whether this capability goes through a generation provider
    pub fn is_generative(&self) -> bool {
        !matches!(self, Self::Transliterate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transliterate => "transliterate",
            Self::GrammarCorrect => "grammar_correct",
            Self::TranslateEnToBn => "translate_en_bn",
            Self::TranslateBnToEn => "translate_bn_en",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a step takes its input from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    /// The trimmed request text
    Original(String),
    /// Whatever the previous step produced
    PreviousOutput,
}

/// One model call in a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    pub capability: Capability,
    pub input: StepInput,
}

impl PipelineStep {
    /// A step consuming the original request text
    pub fn on_original(capability: Capability, text: &str) -> Self {
        Self {
            capability,
            input: StepInput::Original(text.to_string()),
        }
    }

    /// A step consuming the previous step's output
    pub fn chained(capability: Capability) -> Self {
        Self {
            capability,
            input: StepInput::PreviousOutput,
        }
    }
}

/// Ordered, immutable list of steps for one request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelinePlan {
    steps: Vec<PipelineStep>,
}

impl PipelinePlan {
    /// A plan that runs nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_steps(steps: Vec<PipelineStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Capabilities in execution order
    pub fn capabilities(&self) -> Vec<Capability> {
        self.steps.iter().map(|s| s.capability).collect()
    }
}
