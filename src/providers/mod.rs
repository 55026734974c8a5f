/*!
 * Generation provider implementations.
 *
 * This module contains clients for the remote text-to-text models behind the
 * grammar-correction and translation capabilities:
 * - HuggingFace: Hugging Face Inference API
 * - Disabled: a backend that is never available (offline development)
 * - Mock: scripted behaviors for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all generation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the model gateway.
/// Implementations are shared across concurrent requests and must not keep
/// per-request state.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Run a sequence-generation model on a single input
    ///
    /// # Arguments
    /// * `model` - The model identifier, e.g. `Helsinki-NLP/opus-mt-bn-en`
    /// * `input` - The text to feed the model
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or an error
    async fn generate(&self, model: &str, input: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;
}

/// Provider used when generation is switched off
#[derive(Debug, Default, Clone)]
pub struct DisabledProvider;

#[async_trait]
impl Provider for DisabledProvider {
    async fn generate(&self, _model: &str, _input: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled)
    }

    async fn test_connection(&self, _model: &str) -> Result<(), ProviderError> {
        Err(ProviderError::Disabled)
    }
}

pub mod huggingface;
pub mod mock;
