//! Remote clause analysis
//!
//! Sends each clause to a hosted generative model with a fixed prompt and
//! decodes the reply as strict JSON. Failures never reach the caller of
//! [`RemoteAnalyzer::analyze`]; they collapse into
//! [`RemoteAnalysis::sentinel`].

pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod reply;

pub use analyzer::RemoteAnalyzer;
pub use client::{CompletionClient, GeminiClient};
pub use config::{RemoteConfig, API_KEY_VAR};
pub use error::RemoteError;
pub use reply::{decode_reply, RemoteAnalysis};
