//! Common Test Utilities
//!
//! A local media host (axum on an ephemeral port), a counting analysis
//! capability, and helpers for building API state.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use fakecheck::analysis::{AnalysisCapability, AnalysisGateway, CapabilityError};
use fakecheck::api::{serve_listener, AppState, WebhookNotifier};
use fakecheck::config::FetchConfig;
use fakecheck::media::MediaFetcher;
use fakecheck::types::EncodedMedia;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Smallest valid-looking PNG header plus a few bytes of body
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Size of the `/media/huge.png` body
pub const HUGE_BODY_LEN: usize = 64 * 1024;

/// `/media/stream.png` sends this many chunks of [`STREAM_CHUNK_LEN`] bytes, without Content-Length
pub const STREAM_CHUNKS: usize = 8;
pub const STREAM_CHUNK_LEN: usize = 1024;

#[derive(Clone, Default)]
struct HostState {
    callbacks: Arc<Mutex<Vec<Value>>>,
}

/// Local HTTP host serving media fixtures and recording callbacks
pub struct MediaHost {
    pub base_url: String,
    callbacks: Arc<Mutex<Vec<Value>>>,
}

impl MediaHost {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn callbacks(&self) -> Vec<Value> {
        self.callbacks.lock().unwrap().clone()
    }

    /// Poll until `count` callbacks arrived or the timeout passes
    pub async fn wait_for_callbacks(&self, count: usize) -> Vec<Value> {
        for _ in 0..50 {
            let received = self.callbacks();
            if received.len() >= count {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.callbacks()
    }
}

async fn octet_stream_png() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        PNG_BYTES.to_vec(),
    )
}

async fn huge_png() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], vec![0u8; HUGE_BODY_LEN])
}

async fn streamed_png() -> impl IntoResponse {
    let chunks = (0..STREAM_CHUNKS).map(|_| Ok::<_, std::io::Error>(vec![0u8; STREAM_CHUNK_LEN]));
    (
        [(header::CONTENT_TYPE, "image/png")],
        Body::from_stream(futures::stream::iter(chunks)),
    )
}

async fn html_page() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "<html><body>not media</body></html>",
    )
}

async fn unknown_extension() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![1u8, 2, 3, 4],
    )
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

async fn record_callback(State(state): State<HostState>, Json(body): Json<Value>) -> StatusCode {
    state.callbacks.lock().unwrap().push(body);
    StatusCode::NO_CONTENT
}

/// Start the media host on an ephemeral port
pub async fn spawn_media_host() -> MediaHost {
    let state = HostState::default();
    let callbacks = state.callbacks.clone();

    let app = Router::new()
        .route("/media/photo.png", get(octet_stream_png))
        .route("/media/huge.png", get(huge_png))
        .route("/media/stream.png", get(streamed_png))
        .route("/media/page.html", get(html_page))
        .route("/media/blob.xyz", get(unknown_extension))
        .route("/media/missing.png", get(missing))
        .route("/callback", post(record_callback))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MediaHost {
        base_url: format!("http://{}", addr),
        callbacks,
    }
}

/// Capability returning a fixed reply and counting calls
pub struct CountingCapability {
    reply: String,
    calls: AtomicUsize,
}

impl CountingCapability {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisCapability for CountingCapability {
    fn name(&self) -> &str {
        "counting"
    }

    async fn complete(
        &self,
        _media: &EncodedMedia,
        _instruction: &str,
    ) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

pub fn fetch_config(max_bytes: u64) -> FetchConfig {
    FetchConfig {
        max_bytes,
        timeout_seconds: 5,
        ..FetchConfig::default()
    }
}

pub fn api_state(capability: Arc<dyn AnalysisCapability>, max_bytes: u64) -> AppState {
    AppState::new(
        MediaFetcher::new(&fetch_config(max_bytes)).unwrap(),
        AnalysisGateway::new(capability),
        WebhookNotifier::new(5).unwrap(),
    )
}

/// Start the FakeCheck API on an ephemeral port; returns its base URL
pub async fn spawn_api(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve_listener(listener, state).await.unwrap();
    });
    format!("http://{}", addr)
}
