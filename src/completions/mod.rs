//! Client for the legacy text-completion endpoint (`/v1/completions`).

pub mod client;
pub mod request;

pub use client::CompletionClient;
pub use request::CompletionRequest;
