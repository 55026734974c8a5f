/*!
 * Model gateway.
 *
 * One entry point for the four capabilities. Transliteration runs locally;
 * the three generation capabilities go through a shared `Provider`. The
 * gateway owns the failure policy, so callers see either a generated value,
 * a pass-through fallback, or (under `FallbackPolicy::Surface`) an error.
 */

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::Semaphore;

use crate::app_config::{FallbackPolicy, GatewayConfig, GenerationBackend, ModelConfig};
use crate::errors::{GatewayError, ProviderError};
use crate::pipeline::Capability;
use crate::providers::huggingface::HuggingFace;
use crate::providers::{DisabledProvider, Provider};
use crate::transliteration::BanglishTransliterator;

/// Result of one capability call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The capability produced this text
    Generated(String),
    /// The capability was unavailable; this is its input, unchanged
    Fallback(String),
}

impl StepOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Uniform interface over all capabilities
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run one capability on `input`
    async fn invoke(&self, capability: Capability, input: &str) -> Result<StepOutcome, GatewayError>;
}

/// Gateway backed by the local transliterator and a generation provider
#[derive(Debug, Clone)]
pub struct ModelGateway {
    transliterator: BanglishTransliterator,
    provider: Arc<dyn Provider>,
    models: ModelConfig,
    grammar_prompt: String,
    policy: FallbackPolicy,
    permits: Arc<Semaphore>,
}

impl ModelGateway {
    /// Create a gateway around an existing provider
    pub fn new(provider: Arc<dyn Provider>, config: &GatewayConfig) -> Self {
        Self {
            transliterator: BanglishTransliterator::new(),
            provider,
            models: config.models.clone(),
            grammar_prompt: config.grammar_prompt.clone(),
            policy: config.fallback_policy,
            permits: Arc::new(Semaphore::new(config.concurrent_requests.max(1))),
        }
    }

    /// Create a gateway and its provider from configuration
    pub fn from_config(config: &GatewayConfig) -> Self {
        let provider: Arc<dyn Provider> = match config.backend {
            GenerationBackend::HuggingFace => Arc::new(
                HuggingFace::new(&config.api_token, &config.endpoint, config.timeout_secs)
                    .parameters(config.generation.clone())
                    .wait_for_model(config.wait_for_model),
            ),
            GenerationBackend::Disabled => Arc::new(DisabledProvider),
        };

        Self::new(provider, config)
    }

    /// The provider this gateway delegates generation to
    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    fn transliterate(&self, input: &str) -> StepOutcome {
        match self.transliterator.transliterate(input) {
            Ok(text) => StepOutcome::Generated(text),
            Err(e) => {
                warn!("Transliteration fell back to input: {}", e);
                StepOutcome::Fallback(input.to_string())
            }
        }
    }

    async fn generate(&self, capability: Capability, input: &str) -> Result<String, ProviderError> {
        let model = self
            .models
            .for_capability(capability)
            .ok_or_else(|| ProviderError::RequestFailed(format!("No model configured for {}", capability)))?;

        let prompt = match capability {
            Capability::GrammarCorrect => format!("{}{}", self.grammar_prompt, input),
            _ => input.to_string(),
        };

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Gateway is shutting down: {}", e)))?;

        debug!("{} -> {}", capability, model);
        let text = self.provider.generate(model, &prompt).await?;
        if text.trim().is_empty() {
            return Err(ProviderError::ParseError(format!("Empty generation from {}", model)));
        }

        Ok(text)
    }
}

#[async_trait]
impl Gateway for ModelGateway {
    async fn invoke(&self, capability: Capability, input: &str) -> Result<StepOutcome, GatewayError> {
        if !capability.is_generative() {
            return Ok(self.transliterate(input));
        }

        match self.generate(capability, input).await {
            Ok(text) => Ok(StepOutcome::Generated(text)),
            Err(source) => match self.policy {
                FallbackPolicy::PassThrough => {
                    warn!("{} unavailable, passing input through: {}", capability, source);
                    Ok(StepOutcome::Fallback(input.to_string()))
                }
                FallbackPolicy::Surface => Err(GatewayError::Unavailable { capability, source }),
            },
        }
    }
}
