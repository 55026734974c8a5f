/*!
 * Controller lifecycle tests
 */

use anyhow::Result;
use serde_json::Value;

use bhashabridge::app_config::{Config, FallbackPolicy, GenerationBackend};
use bhashabridge::app_controller::Controller;
use bhashabridge::errors::ProviderError;
use bhashabridge::pipeline::{HandleStatus, ReportField};

fn offline_config() -> Config {
    let mut config = Config::default();
    config.gateway.backend = GenerationBackend::Disabled;
    config
}

#[test]
fn test_new_for_test_withDefaults_shouldBuild() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().gateway.backend, GenerationBackend::HuggingFace);
    Ok(())
}

#[test]
fn test_with_config_withoutMarkers_shouldFail() {
    let mut config = offline_config();
    config.classifier.banglish_markers.clear();

    assert!(Controller::with_config(config).is_err());
}

#[tokio::test]
async fn test_process_withDisabledBackend_shouldPassInputsThrough() -> Result<()> {
    let controller = Controller::with_config(offline_config())?;

    let (report, status) = controller.process("ami tomay bhalobashi").await;

    assert_eq!(status, HandleStatus::Ok);
    let bengali = report.get(ReportField::Bengali).unwrap();
    assert_eq!(report.get(ReportField::English), Some(bengali));
    Ok(())
}

#[tokio::test]
async fn test_process_withFallbackReporting_shouldListFallbacks() -> Result<()> {
    let mut config = offline_config();
    config.report_fallbacks = true;
    let controller = Controller::with_config(config)?;

    let (json, _) = controller.process_to_json("Good morning").await?;
    let body: Value = serde_json::from_str(&json)?;

    assert_eq!(body["detected"], "english");
    assert_eq!(body["corrected"], "Good morning");
    assert_eq!(body["bengali"], "Good morning");
    assert_eq!(body["fallbacks"], serde_json::json!(["corrected", "bengali"]));
    Ok(())
}

#[tokio::test]
async fn test_process_withSurfacePolicy_shouldReportError() -> Result<()> {
    let mut config = offline_config();
    config.gateway.fallback_policy = FallbackPolicy::Surface;
    let controller = Controller::with_config(config)?;

    let (report, status) = controller.process("আমি ভাত খাই").await;

    assert_eq!(status, HandleStatus::Ok);
    assert_eq!(
        report.get(ReportField::Error),
        Some("translate_bn_en unavailable: Generation backend is disabled")
    );
    Ok(())
}

#[tokio::test]
async fn test_process_to_json_withEmptyInput_shouldReturnBadRequest() -> Result<()> {
    let controller = Controller::with_config(offline_config())?;

    let (json, status) = controller.process_to_json("   ").await?;

    assert_eq!(status, HandleStatus::BadRequest);
    let body: Value = serde_json::from_str(&json)?;
    assert_eq!(body, serde_json::json!({ "error": "empty" }));
    Ok(())
}

#[tokio::test]
async fn test_probe_models_withDisabledBackend_shouldReportEveryModelUnavailable() -> Result<()> {
    let controller = Controller::with_config(offline_config())?;

    let results = controller.probe_models().await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|(_, r)| matches!(r, Err(ProviderError::Disabled))));
    Ok(())
}
