/*!
 * HTTP surface tests
 *
 * Each test binds a real server on an ephemeral port and talks to it with
 * reqwest.
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

use bhashabridge::pipeline::{Capability, Orchestrator};
use bhashabridge::server::{AppState, INVALID_BODY};

use crate::common::mock_collaborators::ScriptedGateway;
use crate::common::{default_classifier, spawn_server};

async fn start() -> Result<SocketAddr> {
    let orchestrator = Orchestrator::new(default_classifier(), Arc::new(ScriptedGateway::new()));
    spawn_server(AppState::new(orchestrator)).await
}

#[tokio::test]
async fn test_post_root_withJsonBody_shouldReturnReport() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .json(&json!({ "text": "  ami tomay bhalobashi  " }))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["detected"], "banglish");
    assert_eq!(body["original"], "ami tomay bhalobashi");
    assert!(body["bengali"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(body.get("corrected").is_none());
    Ok(())
}

#[tokio::test]
async fn test_post_process_withFormBody_shouldReturnReport() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/process", addr))
        .form(&[("text", "I has went to school yesterday")])
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    let corrected = ScriptedGateway::output(Capability::GrammarCorrect, "I has went to school yesterday");
    assert_eq!(body["detected"], "english");
    assert_eq!(body["corrected"], corrected.as_str());
    assert_eq!(
        body["bengali"],
        ScriptedGateway::output(Capability::TranslateEnToBn, &corrected).as_str()
    );
    Ok(())
}

#[tokio::test]
async fn test_post_withJsonAndNoContentType_shouldStillParse() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .body(r#"{"text": "আমি ভাত খাই"}"#)
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["detected"], "bengali");
    Ok(())
}

#[tokio::test]
async fn test_post_withJsonBodyAndFormContentType_shouldParseJson() -> Result<()> {
    let addr = start().await?;

    // curl -d sends this content type by default
    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(r#"{"text": "ami tomay bhalobashi"}"#)
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["detected"], "banglish");
    assert_eq!(body["original"], "ami tomay bhalobashi");
    Ok(())
}

#[tokio::test]
async fn test_post_withFormBodyWithoutText_shouldReturnEmptyError() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/process", addr))
        .form(&[("message", "hello")])
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "error": "empty" }));
    Ok(())
}

#[tokio::test]
async fn test_post_withEmptyText_shouldReturnBadRequest() -> Result<()> {
    let addr = start().await?;
    let client = reqwest::Client::new();

    for payload in [json!({ "text": "" }), json!({ "text": "   " }), json!({})] {
        let response = client.post(format!("http://{}/", addr)).json(&payload).send().await?;

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await?;
        assert_eq!(body, json!({ "error": "empty" }));
    }
    Ok(())
}

#[tokio::test]
async fn test_post_withNoBody_shouldReturnEmptyError() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new().post(format!("http://{}/", addr)).send().await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "error": "empty" }));
    Ok(())
}

#[tokio::test]
async fn test_post_withMalformedJson_shouldReturnInvalidBody() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/process", addr))
        .header("content-type", "application/json")
        .body("{ text: ")
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "error": INVALID_BODY }));
    Ok(())
}

#[tokio::test]
async fn test_get_health_shouldReportOk() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::get(format!("http://{}/health", addr)).await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn test_get_root_shouldNotBeAllowed() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::get(format!("http://{}/", addr)).await?;

    assert_eq!(response.status(), 405);
    Ok(())
}

#[tokio::test]
async fn test_post_withOrigin_shouldAllowCrossOrigin() -> Result<()> {
    let addr = start().await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .header("origin", "http://localhost:3000")
        .json(&json!({ "text": "Hello" }))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
