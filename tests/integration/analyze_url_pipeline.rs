//! analyze-url: fetch, resolve, analyse, map status

use crate::common::{api_state, spawn_api, spawn_media_host, CountingCapability};
use anyhow::Result;
use fakecheck::analysis::MockCapability;
use serde_json::{json, Value};
use std::sync::Arc;

const SAFE_REPLY: &str =
    r####"{"verdict":"Safe","confidenceScore":0.1,"report":"### Summary\n* Clean"}"####;

async fn post(base: &str, path: &str, body: Value) -> Result<(u16, Value)> {
    let response = reqwest::Client::new()
        .post(format!("{}{}", base, path))
        .json(&body)
        .send()
        .await?;
    let status = response.status().as_u16();
    Ok((status, response.json().await?))
}

#[tokio::test]
async fn test_octet_stream_png_resolved_from_extension() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(SAFE_REPLY);
    let api = spawn_api(api_state(capability.clone(), 1024 * 1024)).await;

    let media_url = host.url("/media/photo.png");
    let (status, body) = post(&api, "/api/v1/analyze-url", json!({ "url": media_url })).await?;

    assert_eq!(status, 200);
    assert_eq!(body["verdict"], "Safe");
    assert_eq!(body["mediaUrl"], media_url.as_str());
    assert!(body.get("error").is_none());
    assert_eq!(capability.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_upstream_404_is_client_error_without_analysis() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(SAFE_REPLY);
    let api = spawn_api(api_state(capability.clone(), 1024 * 1024)).await;

    let (status, body) = post(
        &api,
        "/api/v1/analyze-url",
        json!({ "url": host.url("/media/missing.png") }),
    )
    .await?;

    assert_eq!(status, 400);
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.contains("Server responded with status: 404"), "{}", error);
    assert!(body.get("verdict").is_none());
    assert_eq!(capability.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_oversized_media_is_rejected_before_analysis() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(SAFE_REPLY);
    let api = spawn_api(api_state(capability.clone(), 1024)).await;

    let (status, body) = post(
        &api,
        "/api/v1/analyze-url",
        json!({ "url": host.url("/media/huge.png") }),
    )
    .await?;

    assert_eq!(status, 413);
    assert!(body["error"].is_string());
    assert_eq!(capability.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_streamed_media_over_ceiling_is_rejected_before_analysis() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(SAFE_REPLY);
    let api = spawn_api(api_state(capability.clone(), 4096)).await;

    let (status, body) = post(
        &api,
        "/api/v1/analyze-url",
        json!({ "url": host.url("/media/stream.png") }),
    )
    .await?;

    assert_eq!(status, 413);
    assert!(body["error"].is_string());
    assert_eq!(capability.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_verdict_is_banded_from_confidence() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(r#"{"confidence":0.9}"#);
    let api = spawn_api(api_state(capability, 1024 * 1024)).await;

    let (status, body) = post(
        &api,
        "/api/v1/analyze-url",
        json!({ "url": host.url("/media/photo.png") }),
    )
    .await?;

    assert_eq!(status, 200);
    assert_eq!(body["verdict"], "Likely Manipulated");
    assert_eq!(body["confidenceScore"], 0.9);
    Ok(())
}

#[tokio::test]
async fn test_non_media_urls_are_client_errors() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(SAFE_REPLY);
    let api = spawn_api(api_state(capability.clone(), 1024 * 1024)).await;

    for path in ["/media/page.html", "/media/blob.xyz"] {
        let (status, body) =
            post(&api, "/api/v1/analyze-url", json!({ "url": host.url(path) })).await?;
        assert_eq!(status, 400, "{}", path);
        assert!(body["error"].is_string());
    }

    for bad in [json!({}), json!({ "url": 42 }), json!({ "url": "" })] {
        let (status, body) = post(&api, "/api/v1/analyze-url", bad).await?;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "A valid URL must be provided.");
    }

    assert_eq!(capability.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_reply_is_server_error() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new("I cannot help with that.");
    let api = spawn_api(api_state(capability, 1024 * 1024)).await;

    let (status, body) = post(
        &api,
        "/api/v1/analyze-url",
        json!({ "url": host.url("/media/photo.png") }),
    )
    .await?;

    assert_eq!(status, 500);
    assert!(body["error"].is_string());
    assert!(body.get("confidenceScore").is_none());
    Ok(())
}

#[tokio::test]
async fn test_legacy_route_and_mock_are_deterministic() -> Result<()> {
    let host = spawn_media_host().await;
    let api = spawn_api(api_state(Arc::new(MockCapability::new()), 1024 * 1024)).await;
    let body = json!({ "url": host.url("/media/photo.png") });

    let (first_status, first) = post(&api, "/api/analyze-url", body.clone()).await?;
    let (second_status, second) = post(&api, "/api/v1/analyze-url", body).await?;

    assert_eq!(first_status, 200);
    assert_eq!(second_status, 200);
    assert_eq!(first, second);
    Ok(())
}
