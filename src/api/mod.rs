//! HTTP API
//!
//! - `POST /api/v1/analyze-url` (alias `/api/analyze-url`): fetch a remote URL and analyse it
//! - `POST /api/v1/verify`: analyse a data URI, optionally notifying a callback URL
//! - `GET /api/v1/health`

pub mod handlers;
pub mod server;
pub mod webhook;

pub use handlers::{handle_analyze_url, handle_verify, status_for, ApiResponse, AppState, Stage};
pub use server::{router, serve, serve_listener};
pub use webhook::WebhookNotifier;
