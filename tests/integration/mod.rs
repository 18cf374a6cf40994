//! End-to-end tests against the HTTP API on an ephemeral port

pub mod analyze_url_pipeline;
pub mod media_fetch;
pub mod relay_flow;
pub mod verify_callback;
