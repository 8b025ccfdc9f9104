use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use crate::{
    completions::CompletionClient,
    provider::constants::openai::{API_KEY_ENV_VAR, COMPLETIONS_URL},
};

use super::{
    error::LlmError,
    http::{HttpClientConfig, InspectorConfig},
    types::{GenerationParameters, StopSequence},
};

/// Where the bearer credential comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiKey {
    /// Read `OPENAI_API_KEY` from the environment
    #[default]
    Default,
    /// Read the named environment variable
    Env(String),
    /// Use the given value as is
    Custom(String),
}

impl ApiKey {
    /// Resolve the credential, reading the process environment at most once.
    pub fn resolve(&self) -> Option<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            ApiKey::Default => lookup(API_KEY_ENV_VAR),
            ApiKey::Env(name) => lookup(name),
            ApiKey::Custom(value) => Some(value.clone()),
        }
    }
}

/// Immutable client configuration, resolved once at construction.
#[derive(Clone)]
pub struct ClientConfig {
    credential: Option<String>,
    endpoint_url: String,
    parameters: GenerationParameters,
    http: HttpClientConfig,
}

impl ClientConfig {
    pub fn new(
        credential: Option<String>,
        endpoint_url: impl Into<String>,
        parameters: GenerationParameters,
        http: HttpClientConfig,
    ) -> Self {
        Self {
            credential,
            endpoint_url: endpoint_url.into(),
            parameters,
            http,
        }
    }

    /// The stored credential. `None` when nothing was supplied and the
    /// environment variable was unset.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http
    }

    /// `Authorization` header value. A missing credential renders as
    /// `Bearer None`; the server is left to reject it.
    pub fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.credential.as_deref().unwrap_or("None")),
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("endpoint_url", &self.endpoint_url)
            .field("parameters", &self.parameters)
            .field("http", &self.http)
            .finish()
    }
}

/// Builder for [`CompletionClient`].
///
/// ```rust,no_run
/// use completion_client::{ApiKey, CompletionClient};
///
/// # fn main() -> Result<(), completion_client::LlmError> {
/// let client = CompletionClient::builder()
///     .api_key(ApiKey::Default)
///     .max_tokens(256)
///     .temperature(0.2)
///     .stop(vec!["\n\n"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompletionClientBuilder {
    api_key: ApiKey,
    endpoint_url: String,
    parameters: GenerationParameters,
    http: HttpClientConfig,
    inspector_config: InspectorConfig,
    require_credential: bool,
}

impl Default for CompletionClientBuilder {
    fn default() -> Self {
        Self {
            api_key: ApiKey::Default,
            endpoint_url: COMPLETIONS_URL.to_string(),
            parameters: GenerationParameters::default(),
            http: HttpClientConfig::default(),
            inspector_config: InspectorConfig::default(),
            require_credential: false,
        }
    }
}

impl CompletionClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    /// Fail in [`build`](Self::build) instead of sending `Bearer None` when no
    /// credential can be resolved.
    pub fn require_credential(mut self, require: bool) -> Self {
        self.require_credential = require;
        self
    }

    /// Replace all generation parameters at once.
    pub fn parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.parameters.suffix = Some(suffix.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.parameters.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.parameters.temperature = temperature;
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.parameters.top_p = top_p;
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.parameters.n = n;
        self
    }

    pub fn logprobs(mut self, logprobs: u32) -> Self {
        self.parameters.logprobs = Some(logprobs);
        self
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.parameters.echo = echo;
        self
    }

    pub fn stop(mut self, stop: impl Into<StopSequence>) -> Self {
        self.parameters.stop = Some(stop.into());
        self
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Self {
        self.parameters.presence_penalty = penalty;
        self
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.parameters.frequency_penalty = penalty;
        self
    }

    pub fn best_of(mut self, best_of: u32) -> Self {
        self.parameters.best_of = best_of;
        self
    }

    pub fn logit_bias(mut self, logit_bias: BTreeMap<String, f64>) -> Self {
        self.parameters.logit_bias = Some(logit_bias);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.parameters.user = Some(user.into());
        self
    }

    /// Simple convenience method for a total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = Some(user_agent.into());
        self
    }

    pub fn http_client_config(mut self, config: HttpClientConfig) -> Self {
        self.http = config;
        self
    }

    /// Observe every request body right before it is sent.
    pub fn inspect_request<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.inspector_config.request_inspector = Some(Arc::new(inspector));
        self
    }

    /// Observe every decoded response body.
    pub fn inspect_response<F>(mut self, inspector: F) -> Self
    where
        F: Fn(&serde_json::Value) + Send + Sync + 'static,
    {
        self.inspector_config.response_inspector = Some(Arc::new(inspector));
        self
    }

    /// Resolve the credential and produce the immutable configuration.
    pub fn build_config(&self) -> Result<ClientConfig, LlmError> {
        self.config_with_credential(self.api_key.resolve())
    }

    #[cfg(test)]
    pub(crate) fn build_config_with<F>(&self, lookup: F) -> Result<ClientConfig, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.config_with_credential(self.api_key.resolve_with(lookup))
    }

    fn config_with_credential(
        &self,
        credential: Option<String>,
    ) -> Result<ClientConfig, LlmError> {
        if credential.is_none() {
            if self.require_credential {
                return Err(LlmError::Configuration(format!(
                    "Missing API key. Pass one explicitly or set {}.",
                    self.env_var_name()
                )));
            }
            tracing::warn!(
                env_var = self.env_var_name(),
                "No API key resolved; requests will carry `Bearer None`"
            );
        }

        Ok(ClientConfig::new(
            credential,
            self.endpoint_url.clone(),
            self.parameters.clone(),
            self.http.clone(),
        ))
    }

    pub fn build(self) -> Result<CompletionClient, LlmError> {
        let config = self.build_config()?;
        CompletionClient::with_inspector(config, Some(self.inspector_config))
    }

    fn env_var_name(&self) -> &str {
        match &self.api_key {
            ApiKey::Env(name) => name,
            _ => API_KEY_ENV_VAR,
        }
    }
}
