//! Analysis gateway and capability providers
//!
//! The gateway is the only component that talks to the external analysis
//! capability. It builds the structured instruction, issues exactly one call,
//! and normalises the reply (or the failure) into an [`AnalysisOutcome`].
//!
//! ## Usage
//!
//! ```rust
//! use fakecheck::analysis::{AnalysisGateway, MockCapability};
//! use fakecheck::types::{AnalysisRequest, EncodedMedia};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let gateway = AnalysisGateway::new(Arc::new(MockCapability::new()));
//! let media = EncodedMedia::new("image/png", vec![0x89, b'P', b'N', b'G']).unwrap();
//! match gateway.analyze(AnalysisRequest::new(media)).await {
//!     Ok(result) => println!("{} ({:.2})", result.verdict, result.confidence_score),
//!     Err(failure) => eprintln!("{}", failure.message),
//! }
//! # }
//! ```
//!
//! [`AnalysisOutcome`]: crate::types::AnalysisOutcome

pub mod capability;
pub mod gateway;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod reply;

pub use capability::{build_capability, AnalysisCapability, CapabilityError};
pub use gateway::AnalysisGateway;
pub use gemini::GeminiCapability;
pub use mock::MockCapability;
pub use openai::OpenAiCapability;
pub use prompt::build_instruction;
pub use reply::parse_reply;
