/*!
 * Mock collaborators for orchestration tests
 *
 * `FixedDetector` answers every detection with the same result, so tests can
 * pin the detector output. `ScriptedGateway` stands in for the model gateway:
 * it records every invocation and wraps its input in `capability(...)`, or
 * fails for the capabilities it was told to fail.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use bhashabridge::detection::LanguageDetector;
use bhashabridge::errors::{DetectionError, GatewayError, ProviderError};
use bhashabridge::gateway::{Gateway, StepOutcome};
use bhashabridge::pipeline::Capability;

/// Detector with a canned answer
#[derive(Debug, Clone)]
pub struct FixedDetector {
    result: Result<String, DetectionError>,
}

impl FixedDetector {
    /// Always detect `code`
    pub fn code(code: &str) -> Self {
        Self { result: Ok(code.to_string()) }
    }

    /// Always fail
    pub fn failing() -> Self {
        Self {
            result: Err(DetectionError::Failed("detector offline".to_string())),
        }
    }
}

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Result<String, DetectionError> {
        self.result.clone()
    }
}

/// What the scripted gateway does for a failing capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureMode {
    /// Answer with the input as a fallback
    PassThrough,
    /// Answer with a gateway error
    Surface,
}

/// Gateway double that records calls and produces traceable outputs
#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    failing: Vec<(Capability, FailureMode)>,
    calls: Arc<Mutex<Vec<(Capability, String)>>>,
}

impl ScriptedGateway {
    /// Gateway where every capability succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `capability` fail in the given mode
    pub fn failing(mut self, capability: Capability, mode: FailureMode) -> Self {
        self.failing.push((capability, mode));
        self
    }

    /// Output the gateway produces for a successful call
    pub fn output(capability: Capability, input: &str) -> String {
        format!("{}({})", capability, input)
    }

    /// Invocations received so far, in order
    pub fn calls(&self) -> Vec<(Capability, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn invoke(&self, capability: Capability, input: &str) -> Result<StepOutcome, GatewayError> {
        self.calls.lock().push((capability, input.to_string()));

        match self.failing.iter().find(|(c, _)| *c == capability) {
            None => Ok(StepOutcome::Generated(Self::output(capability, input))),
            Some((_, FailureMode::PassThrough)) => Ok(StepOutcome::Fallback(input.to_string())),
            Some((_, FailureMode::Surface)) => Err(GatewayError::Unavailable {
                capability,
                source: ProviderError::ConnectionError("backend unreachable".to_string()),
            }),
        }
    }
}
