use crate::{
    core::{
        ApiKey, ClientConfig, CompletionClientBuilder, CompletionResponse, GenerationParameters,
        HttpClient, InspectorConfig, LlmError,
    },
    provider::constants::openai::COMPLETION_MODEL,
};

use super::request::CompletionRequest;

/// Async client for a text-completion endpoint.
///
/// Holds only immutable configuration, so a shared reference can serve any
/// number of concurrent calls.
pub struct CompletionClient {
    config: ClientConfig,
    http: HttpClient,
}

impl CompletionClient {
    /// Create a client against the default endpoint.
    ///
    /// A credential that cannot be resolved is kept as `None`; use
    /// [`CompletionClient::builder`] with `require_credential(true)` to fail
    /// fast instead.
    pub fn new(api_key: ApiKey, parameters: GenerationParameters) -> Result<Self, LlmError> {
        CompletionClientBuilder::new()
            .api_key(api_key)
            .parameters(parameters)
            .build()
    }

    pub fn builder() -> CompletionClientBuilder {
        CompletionClientBuilder::new()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, LlmError> {
        Self::with_inspector(config, None)
    }

    pub(crate) fn with_inspector(
        config: ClientConfig,
        inspector_config: Option<InspectorConfig>,
    ) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config(), inspector_config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The exact body `get_completion` sends for `prompt`.
    pub fn build_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest::new(COMPLETION_MODEL, prompt, self.config.parameters())
    }

    /// Send `prompt` to the endpoint and return the decoded JSON unmodified.
    #[tracing::instrument(
        name = "get_completion",
        skip(self, prompt),
        fields(endpoint = %self.config.endpoint_url(), prompt_len = prompt.len()),
        err
    )]
    pub async fn get_completion(&self, prompt: &str) -> Result<CompletionResponse, LlmError> {
        let request = self.build_request(prompt);

        let headers = [
            ("Content-Type".to_string(), "application/json".to_string()),
            self.config.auth_header(),
        ];

        self.http
            .post_json(self.config.endpoint_url(), &headers, &request)
            .await
    }
}
