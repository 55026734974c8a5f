use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::app_config::{Config, GenerationBackend};
use crate::classifier::LanguageClassifier;
use crate::detection::TrigramDetector;
use crate::errors::ProviderError;
use crate::gateway::ModelGateway;
use crate::pipeline::{Capability, HandleStatus, Orchestrator, ResponseReport};
use crate::server::{self, AppState};

// @module: Application controller wiring configuration to the pipeline

/// Generation capabilities probed at startup
const PROBED_CAPABILITIES: [Capability; 3] = [
    Capability::GrammarCorrect,
    Capability::TranslateEnToBn,
    Capability::TranslateBnToEn,
];

/// Main application controller
#[derive(Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Gateway shared with the orchestrator
    gateway: Arc<ModelGateway>,
    // @field: Request orchestrator
    orchestrator: Arc<Orchestrator>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let classifier = LanguageClassifier::from_config(Box::new(TrigramDetector::new()), &config.classifier)
            .context("Failed to build the language classifier")?;
        let gateway = Arc::new(ModelGateway::from_config(&config.gateway));
        let orchestrator = Orchestrator::new(classifier, gateway.clone())
            .with_fallback_reporting(config.report_fallbacks);

        Ok(Self {
            config,
            gateway,
            orchestrator: Arc::new(orchestrator),
        })
    }

    /// The configuration this controller was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared orchestrator
    pub fn orchestrator(&self) -> Arc<Orchestrator> {
        self.orchestrator.clone()
    }

    /// Process one snippet without going through HTTP
    pub async fn process(&self, text: &str) -> (ResponseReport, HandleStatus) {
        self.orchestrator.handle(text).await
    }

    /// Process one snippet and render the report as pretty JSON
    pub async fn process_to_json(&self, text: &str) -> Result<(String, HandleStatus)> {
        let (report, status) = self.process(text).await;
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        Ok((json, status))
    }

    /// Try every configured model once and return the per-capability results
    pub async fn probe_models(&self) -> Vec<(Capability, Result<(), ProviderError>)> {
        let provider = self.gateway.provider();
        let mut results = Vec::with_capacity(PROBED_CAPABILITIES.len());

        for capability in PROBED_CAPABILITIES {
            let result = match self.config.gateway.models.for_capability(capability) {
                Some(model) => provider.test_connection(model).await,
                None => Ok(()),
            };
            results.push((capability, result));
        }

        results
    }

    /// Serve HTTP requests until shutdown
    pub async fn serve(&self) -> Result<()> {
        let gateway = &self.config.gateway;
        info!(
            "Using {} backend, fallback policy {:?}",
            gateway.backend.display_name(),
            gateway.fallback_policy
        );

        if gateway.backend == GenerationBackend::Disabled {
            warn!("Generation backend is disabled, every generative step will fall back");
        } else {
            self.spawn_model_probe();
        }

        let state = AppState {
            orchestrator: self.orchestrator.clone(),
        };
        server::serve(state, &self.config.server.bind_address, &self.config.server.cors_origins).await
    }

    // Results are only logged
    fn spawn_model_probe(&self) {
        let controller = self.clone();

        tokio::spawn(async move {
            for (capability, result) in controller.probe_models().await {
                match result {
                    Ok(()) => info!("{} model is reachable", capability),
                    Err(e) => warn!("{} model is not reachable, requests will fall back: {}", capability, e),
                }
            }
        });
    }
}
