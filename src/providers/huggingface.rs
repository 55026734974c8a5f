use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Default public inference endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";

/// Hugging Face Inference API client
#[derive(Debug, Clone)]
pub struct HuggingFace {
    /// HTTP client for API requests, pooled and shared across requests
    client: Client,
    /// Bearer token for authentication
    api_token: String,
    /// API endpoint URL, models are addressed as `{endpoint}/{model}`
    endpoint: String,
    /// Generation parameters sent with every request
    parameters: GenerationParameters,
    /// Ask the API to block while a cold model loads instead of answering 503
    wait_for_model: bool,
    /// Request timeout, kept for error reporting
    timeout_secs: u64,
}

/// Generation parameters for text-to-text models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Maximum length of the generated sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Number of beams for beam search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_beams: Option<u32>,

    /// Stop beam search once every beam has finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_stopping: Option<bool>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: Some(128),
            num_beams: Some(3),
            early_stopping: Some(true),
        }
    }
}

/// Inference request body
#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    /// The text to feed the model
    pub inputs: &'a str,

    /// Generation parameters
    pub parameters: &'a GenerationParameters,

    /// Service options
    pub options: InferenceOptions,
}

/// Service-level options for an inference request
#[derive(Debug, Serialize)]
pub struct InferenceOptions {
    /// Block until the model is loaded
    pub wait_for_model: bool,
}

/// One generated sequence
///
/// text2text models answer with `generated_text`, translation models with
/// `translation_text`.
#[derive(Debug, Deserialize)]
pub struct InferenceOutput {
    #[serde(default)]
    pub generated_text: Option<String>,
    #[serde(default)]
    pub translation_text: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

impl HuggingFace {
    /// Create a new Hugging Face client
    pub fn new(api_token: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            api_token: api_token.into(),
            endpoint: endpoint.into(),
            parameters: GenerationParameters::default(),
            wait_for_model: true,
            timeout_secs,
        }
    }

    /// Set the generation parameters
    pub fn parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set whether to wait for cold models
    pub fn wait_for_model(mut self, wait: bool) -> Self {
        self.wait_for_model = wait;
        self
    }

    /// URL of a model on this endpoint
    pub fn model_url(&self, model: &str) -> String {
        let endpoint = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.as_str()
        };
        format!("{}/{}", endpoint.trim_end_matches('/'), model.trim_start_matches('/'))
    }

    /// Send one inference request and return the raw outputs
    pub async fn infer(&self, model: &str, input: &str) -> Result<Vec<InferenceOutput>, ProviderError> {
        let url = self.model_url(model);
        let body = InferenceRequest {
            inputs: input,
            parameters: &self.parameters,
            options: InferenceOptions {
                wait_for_model: self.wait_for_model,
            },
        };

        debug!("POST {} ({} chars)", url, input.chars().count());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            let message = serde_json::from_str::<InferenceErrorBody>(&error_text)
                .map(|b| b.error)
                .unwrap_or(error_text);
            error!("Hugging Face API error ({}) for {}: {}", status, model, message);
            return Err(Self::classify_status(status, message));
        }

        response
            .json::<Vec<InferenceOutput>>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Hugging Face API response: {}", e)))
    }

    /// Extract the first non-empty generation from the outputs
    pub fn extract_text(outputs: &[InferenceOutput]) -> Option<String> {
        outputs
            .iter()
            .filter_map(|o| o.generated_text.as_deref().or(o.translation_text.as_deref()))
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn classify_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }

    fn classify_status(status: StatusCode, message: String) -> ProviderError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl Provider for HuggingFace {
    async fn generate(&self, model: &str, input: &str) -> Result<String, ProviderError> {
        let outputs = self.infer(model, input).await?;
        Self::extract_text(&outputs)
            .ok_or_else(|| ProviderError::ParseError(format!("No generated text in response from {}", model)))
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        self.generate(model, "Hello").await.map(|_| ())
    }
}
