/*!
 * Request orchestrator.
 *
 * Drives one request through `Validating → Classifying → Planning →
 * Executing(i of n) → Responding`. The orchestrator holds no per-request
 * state and is shared read-only between concurrent requests.
 */

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use uuid::Uuid;

use super::report::{ReportField, ResponseReport};
use super::selector::select;
use super::StepInput;
use crate::classifier::LanguageClassifier;
use crate::gateway::Gateway;

/// Error message for empty input
pub const EMPTY_INPUT: &str = "empty";

/// Transport-independent outcome of `handle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    /// The report is complete (possibly with fallback values)
    Ok,
    /// The input was rejected before any processing
    BadRequest,
}

impl HandleStatus {
    /// Matching HTTP status code
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
        }
    }
}

/// Routes a request through classification, planning and execution
pub struct Orchestrator {
    classifier: LanguageClassifier,
    gateway: Arc<dyn Gateway>,
    report_fallbacks: bool,
}

impl Orchestrator {
    /// Create an orchestrator
    pub fn new(classifier: LanguageClassifier, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            classifier,
            gateway,
            report_fallbacks: false,
        }
    }

    /// List fallback fields in reports
    pub fn with_fallback_reporting(mut self, enabled: bool) -> Self {
        self.report_fallbacks = enabled;
        self
    }

    /// Handle one request
    pub async fn handle(&self, raw_text: &str) -> (ResponseReport, HandleStatus) {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let text = raw_text.trim();
        if text.is_empty() {
            debug!("[{}] rejected empty input", request_id);
            return (ResponseReport::error(EMPTY_INPUT), HandleStatus::BadRequest);
        }

        let label = self.classifier.classify(text);
        debug!("[{}] classified as {}", request_id, label);

        let mut report = ResponseReport::seeded(label, text);
        let plan = select(label, text);
        debug!("[{}] plan: {:?}", request_id, plan.capabilities());

        let total = plan.len();
        let mut previous: Option<String> = None;

        for (index, step) in plan.steps().iter().enumerate() {
            let input = match &step.input {
                StepInput::Original(text) => text.clone(),
                StepInput::PreviousOutput => match previous.take() {
                    Some(output) => output,
                    None => {
                        warn!("[{}] {} has no input from a previous step", request_id, step.capability);
                        break;
                    }
                },
            };

            debug!("[{}] step {} of {}: {}", request_id, index + 1, total, step.capability);

            let field = step.capability.report_field();
            match self.gateway.invoke(step.capability, &input).await {
                Ok(outcome) => {
                    if outcome.is_fallback() && self.report_fallbacks {
                        report.mark_fallback(field);
                    }
                    let output = outcome.into_text();
                    report.set(field, output.clone());
                    previous = Some(output);
                }
                Err(e) => {
                    warn!("[{}] step {} failed, skipping the rest of the plan: {}", request_id, index + 1, e);
                    report.set(ReportField::Error, e.to_string());
                    break;
                }
            }
        }

        info!(
            "[{}] {} request handled in {} ms",
            request_id,
            label,
            start.elapsed().as_millis()
        );

        (report, HandleStatus::Ok)
    }
}
