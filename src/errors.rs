/*!
 * Error types for the bhashabridge service.
 *
 * This module contains custom error types for the different parts of the
 * request pipeline, using the thiserror crate for ergonomic error definitions.
 * None of these errors is ever fatal to the process: the orchestrator turns
 * every one of them into either a fallback value or a field of the report.
 */

use thiserror::Error;

use crate::pipeline::Capability;

/// Errors that can occur when talking to a generation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The generation backend is switched off in configuration
    #[error("Generation backend is disabled")]
    Disabled,
}

/// Errors reported by a language detector
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// The text carries no letters to classify (digits, punctuation, emoji)
    #[error("No features in text")]
    NoFeatures,

    /// A remote or pluggable detector failed
    #[error("Language detector failed: {0}")]
    Failed(String),
}

/// Errors raised by the local transliteration engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransliterationError {
    /// Nothing in the input looks like romanized text
    #[error("No romanized text to transliterate")]
    NoRomanizedText,
}

/// Errors surfaced by the model gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A generation capability could not produce an output
    #[error("{capability} unavailable: {source}")]
    Unavailable {
        /// The capability that was invoked
        capability: Capability,
        /// The underlying provider failure
        #[source]
        source: ProviderError,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the gateway
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
