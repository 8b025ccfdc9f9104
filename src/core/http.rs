//! Thin HTTP layer shared by the completion client.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::header::CONTENT_TYPE;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Settings for the underlying `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Total request timeout. `None` keeps the HTTP layer default.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

pub type Inspector = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Callbacks that observe the raw JSON going over the wire.
#[derive(Clone, Default)]
pub struct InspectorConfig {
    pub request_inspector: Option<Inspector>,
    pub response_inspector: Option<Inspector>,
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("request_inspector", &self.request_inspector.is_some())
            .field("response_inspector", &self.response_inspector.is_some())
            .finish()
    }
}

/// Single-shot JSON POST client. No retries, no status-code handling.
pub struct HttpClient {
    client: reqwest::Client,
    inspector_config: Option<InspectorConfig>,
}

impl HttpClient {
    pub fn new(
        config: &HttpClientConfig,
        inspector_config: Option<InspectorConfig>,
    ) -> Result<Self, LlmError> {
        let default_ua = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        // No idle connections are kept: each call opens and releases its own.
        let mut builder = reqwest::Client::builder()
            .user_agent(ua)
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::Configuration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self {
            client,
            inspector_config,
        })
    }

    /// POST `body` as JSON and decode whatever JSON comes back.
    ///
    /// The response status is not inspected: an error payload from the server
    /// is decoded like any other body. The body must be labelled
    /// `application/json` (parameters such as `charset` are ignored).
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        // Serialized straight from the typed body so field order and float
        // values are exactly what the caller built.
        let body_bytes = serde_json::to_vec(body).map_err(|e| LlmError::Parse {
            message: "Failed to serialize request body".to_string(),
            source: Box::new(e),
        })?;

        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|config| config.request_inspector.as_ref())
        {
            let body_value: serde_json::Value =
                serde_json::from_slice(&body_bytes).map_err(|e| LlmError::Parse {
                    message: "Failed to serialize request for inspection".to_string(),
                    source: Box::new(e),
                })?;
            inspector(&body_value);
        }

        let mut req_builder = self.client.post(url);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }
        if !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
        {
            req_builder = req_builder.header(CONTENT_TYPE, "application/json");
        }

        let res = req_builder.body(body_bytes).send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            LlmError::Network {
                message: "Failed to complete request".to_string(),
                source: Box::new(e),
            }
        })?;

        debug!(status = %res.status(), "HTTP response received");

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !is_json_mime(content_type.as_deref()) {
            return Err(LlmError::Parse {
                message: "Unexpected response content type".to_string(),
                source: format!(
                    "expected application/json, got {}",
                    content_type.as_deref().unwrap_or("no content type")
                )
                .into(),
            });
        }

        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        let response_value: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
                message: "Failed to parse response as JSON".to_string(),
                source: Box::new(e),
            })?;

        if let Some(inspector) = self
            .inspector_config
            .as_ref()
            .and_then(|config| config.response_inspector.as_ref())
        {
            inspector(&response_value);
        }

        serde_json::from_value(response_value).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}

/// Matches the bare mime type, ignoring parameters like `charset`.
fn is_json_mime(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
