use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use excuse_common::ExcuseResponse;
use excuse_gateway::config::GeneratorConfig;
use excuse_gateway::engine::{GenerationClient, HttpGenerationClient};
use excuse_gateway::state::AppState;

const INVOCATIONS: &str = "/serving-endpoints/excuse-llm/invocations";

fn app_for(server: &MockServer, token: Option<&str>, timeout: Duration) -> Result<axum::Router> {
    let config = Arc::new(
        GeneratorConfig::new(server.url(INVOCATIONS), token.map(str::to_string))
            .with_timeout(timeout),
    );
    let client: Arc<dyn GenerationClient> = Arc::new(HttpGenerationClient::new(config.clone())?);
    Ok(excuse_gateway::router(AppState::new(config, client)))
}

fn chat_reply(content: &str) -> Value {
    json!({
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn valid_form() -> Value {
    json!({
        "category": "Running Late",
        "tone": "Playful",
        "seriousness": 3,
        "recipient_name": "Alex",
        "sender_name": "Mona",
        "eta_when": "15 minutes"
    })
}

async fn post_form(app: axum::Router, body: String) -> Result<(StatusCode, ExcuseResponse)> {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-excuse")
                .header("content-type", "application/json")
                .body(Body::from(body))?,
        )
        .await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_structured_reply_round_trip() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(INVOCATIONS)
                .header("authorization", "Bearer test-token")
                .body_contains("Recipient: Alex")
                .body_contains("\"max_tokens\":1000");
            then.status(200)
                .json_body(chat_reply(r#"{"subject":"S","body":"B"}"#));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    mock.assert_hits_async(1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, ExcuseResponse::success("S", "B"));
    Ok(())
}

#[tokio::test]
async fn test_plain_text_reply() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).body("Hello\nworld");
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (_, resp) = post_form(app, valid_form().to_string()).await?;

    assert!(resp.success);
    assert_eq!(resp.subject, "Hello");
    assert_eq!(resp.body, "world");
    Ok(())
}

#[tokio::test]
async fn test_bare_json_string_reply() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).json_body(json!("Hello\nworld"));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (_, resp) = post_form(app, valid_form().to_string()).await?;

    assert!(resp.success);
    assert_eq!(resp.subject, "Hello");
    assert_eq!(resp.body, "world");
    Ok(())
}

#[tokio::test]
async fn test_labelled_reply_mentioning_braces() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).json_body(chat_reply(
                "Subject: Running late\n\nHi Alex, config was {\"retries\": 0} again.\n\nMona",
            ));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp.subject, "Running late");
    assert!(resp.body.contains("{\"retries\": 0}"));
    Ok(())
}

#[tokio::test]
async fn test_missing_subject_gets_default() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200)
                .json_body(chat_reply(r#"{"body":"Hi Alex, on my way. Mona"}"#));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (_, resp) = post_form(app, valid_form().to_string()).await?;

    assert!(resp.success);
    assert_eq!(resp.subject, "Running Late - ETA 15 minutes");
    assert_eq!(resp.body, "Hi Alex, on my way. Mona");
    Ok(())
}

#[tokio::test]
async fn test_invalid_fields_never_reach_upstream() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).json_body(chat_reply("unused"));
        })
        .await;

    let mut missing_recipient = valid_form();
    missing_recipient["recipient_name"] = json!("");
    let mut missing_sender = valid_form();
    if let Some(o) = missing_sender.as_object_mut() {
        o.remove("sender_name");
    }
    let mut bad_seriousness = valid_form();
    bad_seriousness["seriousness"] = json!(7);
    let mut bad_category = valid_form();
    bad_category["category"] = json!("Alien Abduction");
    let mut bad_tone = valid_form();
    bad_tone["tone"] = json!("Grumpy");

    for form in [
        missing_recipient,
        missing_sender,
        bad_seriousness,
        bad_category,
        bad_tone,
    ] {
        let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
        let (status, resp) = post_form(app, form.to_string()).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!resp.success);
        assert!(resp.error.is_some());
    }

    mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_failed_response() -> Result<()> {
    let server = MockServer::start_async().await;
    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;

    let (status, resp) = post_form(app, "{not json".to_string()).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!resp.success);
    assert!(resp
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("invalid request body")));
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_reported_without_retry() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(chat_reply(r#"{"subject":"S","body":"B"}"#));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_millis(300))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!resp.success);
    let error = resp.error.unwrap_or_default();
    assert!(error.contains("timed out"), "unexpected error: {error}");
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_upstream_auth_error() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(401).body("invalid token");
        })
        .await;

    let app = app_for(&server, Some("wrong-token"), Duration::from_secs(5))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        resp.error.as_deref(),
        Some("LLM service error: 401 (credential rejected)")
    );
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_skips_upstream() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).json_body(chat_reply("unused"));
        })
        .await;

    let app = app_for(&server, None, Duration::from_secs(5))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.error.as_deref(), Some("DATABRICKS_API_TOKEN not configured"));
    mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_unparseable_reply() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(INVOCATIONS);
            then.status(200).json_body(chat_reply(r#"{"subject":"only a subject"}"#));
        })
        .await;

    let app = app_for(&server, Some("test-token"), Duration::from_secs(5))?;
    let (status, resp) = post_form(app, valid_form().to_string()).await?;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(resp
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("could not parse LLM response")));
    Ok(())
}
