//! # completion-client
//!
//! Thin async client for text-completion endpoints: one prompt in, the raw
//! JSON completion out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use completion_client::{ApiKey, CompletionClient, GenerationParameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new(ApiKey::Default, GenerationParameters::default())?;
//!     let response = client.get_completion("Write a haiku about rust.").await?;
//!     println!("{}", response["choices"][0]["text"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Known Issues
//!
//! Without an explicit key and without `OPENAI_API_KEY` set, the client still
//! builds and sends `Authorization: Bearer None`. Enable
//! `require_credential(true)` on the builder to fail at construction instead.

pub mod completions;
pub mod core;
pub mod provider;

pub use completions::{CompletionClient, CompletionRequest};
pub use core::{
    ApiKey, ClientConfig, CompletionClientBuilder, CompletionResponse, GenerationParameters,
    HttpClientConfig, InspectorConfig, LlmError, StopSequence,
};
