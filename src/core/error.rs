use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    /// The client could not be constructed, e.g. a required credential is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection, DNS or TLS failure while talking to the endpoint.
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    /// The request could not be encoded or the response body is not valid JSON.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxError,
    },
}
