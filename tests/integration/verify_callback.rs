//! verify: data URI intake and webhook delivery

use crate::common::{api_state, spawn_api, spawn_media_host, CountingCapability, PNG_BYTES};
use anyhow::Result;
use fakecheck::types::EncodedMedia;
use serde_json::{json, Value};

#[tokio::test]
async fn test_verify_posts_result_to_callback() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new(r#"{"verdict":"Suspicious","confidenceScore":0.6}"#);
    let api = spawn_api(api_state(capability, 1024 * 1024)).await;

    let data_uri = EncodedMedia::new("image/png", PNG_BYTES.to_vec())?.to_data_uri();
    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/verify", api))
        .json(&json!({
            "mediaDataUri": data_uri,
            "callbackUrl": host.url("/callback"),
            "reference": "case-17",
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["verdict"], "Suspicious");
    assert_eq!(body["reference"], "case-17");

    let callbacks = host.wait_for_callbacks(1).await;
    assert_eq!(callbacks.len(), 1);
    assert_eq!(callbacks[0], body);
    Ok(())
}

#[tokio::test]
async fn test_verify_rejects_bad_input() -> Result<()> {
    let capability = CountingCapability::new("{}");
    let api = spawn_api(api_state(capability.clone(), 1024 * 1024)).await;
    let client = reqwest::Client::new();

    let cases = [
        (json!({}), "A media data URI must be provided."),
        (
            json!({ "mediaDataUri": "data:image/png;base64,AAAA", "callbackUrl": "ftp://x" }),
            "Invalid callback URL format.",
        ),
    ];
    for (request, expected) in cases {
        let response = client
            .post(format!("{}/api/v1/verify", api))
            .json(&request)
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], expected);
    }

    let response = client
        .post(format!("{}/api/v1/verify", api))
        .json(&json!({ "mediaDataUri": "data:text/plain;base64,aGk=" }))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 400);

    assert_eq!(capability.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_undecodable_data_uri_still_notifies_callback() -> Result<()> {
    let host = spawn_media_host().await;
    let capability = CountingCapability::new("{}");
    let api = spawn_api(api_state(capability.clone(), 1024 * 1024)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/verify", api))
        .json(&json!({
            "mediaDataUri": "data:image/png;base64,@@not-base64@@",
            "callbackUrl": host.url("/callback"),
            "reference": "case-18",
        }))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await?;
    assert!(body["error"].is_string());
    assert_eq!(body["reference"], "case-18");

    let callbacks = host.wait_for_callbacks(1).await;
    assert_eq!(callbacks, vec![body]);
    assert_eq!(capability.calls(), 0);
    Ok(())
}
