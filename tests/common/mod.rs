/*!
 * Common test utilities for the bhashabridge test suite
 */

use anyhow::Result;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use bhashabridge::app_config::{FallbackPolicy, GatewayConfig};
use bhashabridge::classifier::{BanglishHeuristic, LanguageClassifier};
use bhashabridge::detection::TrigramDetector;
use bhashabridge::gateway::ModelGateway;
use bhashabridge::pipeline::Orchestrator;
use bhashabridge::providers::mock::MockProvider;
use bhashabridge::server::{AppState, build_router};

// Re-export the mock collaborators module
pub mod mock_collaborators;

/// Route library logs to the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Classifier with the production detector and the default marker words
pub fn default_classifier() -> LanguageClassifier {
    LanguageClassifier::new(Box::new(TrigramDetector::new()), BanglishHeuristic::default())
}

/// Orchestrator over a real `ModelGateway` backed by `provider`
pub fn orchestrator_with_provider(provider: MockProvider, policy: FallbackPolicy) -> Orchestrator {
    let config = GatewayConfig {
        fallback_policy: policy,
        ..Default::default()
    };
    let gateway = Arc::new(ModelGateway::new(Arc::new(provider), &config));
    Orchestrator::new(default_classifier(), gateway)
}

/// Bind the router on an ephemeral port and serve it in the background
pub async fn spawn_server(state: AppState) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = build_router(state, &[]);

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(addr)
}
