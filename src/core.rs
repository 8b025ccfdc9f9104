pub mod builder;
pub mod error;
pub mod http;
pub mod types;

pub use builder::{ApiKey, ClientConfig, CompletionClientBuilder};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig, InspectorConfig};
pub use types::{CompletionResponse, GenerationParameters, StopSequence};
