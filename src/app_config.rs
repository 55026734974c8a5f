use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;

use crate::pipeline::Capability;
use crate::providers::huggingface::{DEFAULT_ENDPOINT, GenerationParameters};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Model gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Language classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// List the report fields that hold pass-through fallbacks
    #[serde(default)]
    pub report_fallbacks: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:5000"
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_origins: Vec::new(),
        }
    }
}

/// Generation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationBackend {
    // @backend: Hugging Face Inference API
    #[default]
    HuggingFace,
    // @backend: No generation, every call is unavailable
    Disabled,
}

impl GenerationBackend {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::HuggingFace => "Hugging Face",
            Self::Disabled => "Disabled",
        }
    }
}

impl std::fmt::Display for GenerationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "huggingface"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

impl std::str::FromStr for GenerationBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "disabled" | "none" => Ok(Self::Disabled),
            _ => Err(anyhow!("Invalid generation backend: {}", s)),
        }
    }
}

/// What a generation step does when its backend fails
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// The step output is its own input, unchanged
    #[default]
    PassThrough,
    /// The failure is reported in the `error` field and the plan stops
    Surface,
}

/// Model identifiers per generation capability
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    /// English grammar correction model
    #[serde(default = "default_grammar_model")]
    pub grammar_correct: String,

    /// English to Bengali translation model
    #[serde(default = "default_en_bn_model")]
    pub translate_en_bn: String,

    /// Bengali to English translation model
    #[serde(default = "default_bn_en_model")]
    pub translate_bn_en: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            grammar_correct: default_grammar_model(),
            translate_en_bn: default_en_bn_model(),
            translate_bn_en: default_bn_en_model(),
        }
    }
}

impl ModelConfig {
    /// Model serving a generation capability
    pub fn for_capability(&self, capability: Capability) -> Option<&str> {
        match capability {
            Capability::GrammarCorrect => Some(&self.grammar_correct),
            Capability::TranslateEnToBn => Some(&self.translate_en_bn),
            Capability::TranslateBnToEn => Some(&self.translate_bn_en),
            Capability::Transliterate => None,
        }
    }
}

/// Model gateway configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Generation backend to use
    #[serde(default)]
    pub backend: GenerationBackend,

    /// Inference endpoint URL; models are addressed as `{endpoint}/{model}`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token; usually supplied through the HF_TOKEN environment variable
    #[serde(default = "String::new", skip_serializing_if = "String::is_empty")]
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of in-flight generation calls across all requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Behavior when a generation call fails
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,

    /// Models per capability
    #[serde(default)]
    pub models: ModelConfig,

    /// Prompt prefix for the grammar correction model
    #[serde(default = "default_grammar_prompt")]
    pub grammar_prompt: String,

    /// Generation parameters sent with every call
    #[serde(default)]
    pub generation: GenerationParameters,

    /// Block while a cold model loads instead of failing fast
    #[serde(default = "default_true")]
    pub wait_for_model: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: GenerationBackend::default(),
            endpoint: default_endpoint(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
            concurrent_requests: default_concurrent_requests(),
            fallback_policy: FallbackPolicy::default(),
            models: ModelConfig::default(),
            grammar_prompt: default_grammar_prompt(),
            generation: GenerationParameters::default(),
            wait_for_model: true,
        }
    }
}

/// Language classifier configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Romanized Bengali function words that mark text as Banglish
    #[serde(default = "default_banglish_markers")]
    pub banglish_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            banglish_markers: default_banglish_markers(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrent_requests() -> usize {
    16
}

fn default_grammar_model() -> String {
    "pszemraj/flan-t5-small-grammar-synthesis".to_string()
}

fn default_en_bn_model() -> String {
    "Helsinki-NLP/opus-mt-en-bn".to_string()
}

fn default_bn_en_model() -> String {
    "Helsinki-NLP/opus-mt-bn-en".to_string()
}

fn default_grammar_prompt() -> String {
    "grammar: ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_banglish_markers() -> Vec<String> {
    ["ami", "tumi", "valo", "bhalobashi", "kemon", "acho", "tomay"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a configuration file, writing the defaults there first if it is missing
    ///
    /// Returns the configuration and whether it was created.
    pub fn load_or_create(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::from_file(path)?, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid bind address '{}': {}", self.server.bind_address, e))?;

        if self.classifier.banglish_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(anyhow!("At least one Banglish marker word is required"));
        }

        let gateway = &self.gateway;
        if gateway.backend == GenerationBackend::HuggingFace {
            url::Url::parse(&gateway.endpoint)
                .map_err(|e| anyhow!("Invalid inference endpoint '{}': {}", gateway.endpoint, e))?;

            if gateway.api_token.is_empty() {
                return Err(anyhow!(
                    "An API token is required for the Hugging Face backend (set HF_TOKEN or use the disabled backend)"
                ));
            }
        }

        for (name, model) in [
            ("grammar_correct", &gateway.models.grammar_correct),
            ("translate_en_bn", &gateway.models.translate_en_bn),
            ("translate_bn_en", &gateway.models.translate_bn_en),
        ] {
            if model.trim().is_empty() {
                return Err(anyhow!("Model name for {} must not be empty", name));
            }
        }

        if gateway.timeout_secs == 0 {
            return Err(anyhow!("Gateway timeout must be at least one second"));
        }

        if gateway.concurrent_requests == 0 {
            return Err(anyhow!("Gateway concurrent_requests must be at least 1"));
        }

        Ok(())
    }
}
