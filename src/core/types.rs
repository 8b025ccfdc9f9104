use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw JSON returned by the completion endpoint. The client never looks inside it.
pub type CompletionResponse = serde_json::Value;

/// One or more sequences at which the model stops generating.
///
/// Serializes to either a bare string or an array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequence {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for StopSequence {
    fn from(value: &str) -> Self {
        StopSequence::Single(value.to_string())
    }
}

impl From<String> for StopSequence {
    fn from(value: String) -> Self {
        StopSequence::Single(value)
    }
}

impl From<Vec<String>> for StopSequence {
    fn from(value: Vec<String>) -> Self {
        StopSequence::Multiple(value)
    }
}

impl From<Vec<&str>> for StopSequence {
    fn from(value: Vec<&str>) -> Self {
        StopSequence::Multiple(value.into_iter().map(str::to_string).collect())
    }
}

/// Sampling and control knobs sent with every completion request.
///
/// Fields are independent of each other; the client forwards them as given
/// and leaves validation to the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    /// Text that comes after the inserted completion
    pub suffix: Option<String>,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling parameter (0.0 to 1.0)
    pub top_p: f64,

    /// Number of completions generated per prompt
    pub n: u32,

    /// Return log probabilities for this many most likely tokens
    pub logprobs: Option<u32>,

    /// Echo the prompt back in front of the completion
    pub echo: bool,

    pub stop: Option<StopSequence>,

    /// Between -2.0 and 2.0
    pub presence_penalty: f64,

    /// Between -2.0 and 2.0
    pub frequency_penalty: f64,

    /// Candidates generated server-side; the best `n` are returned
    pub best_of: u32,

    /// Token id to bias weight, e.g. `{"50256": -100}` bans `<|endoftext|>`
    pub logit_bias: Option<BTreeMap<String, f64>>,

    /// Identifier of the end user on whose behalf the request is made
    pub user: Option<String>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            suffix: None,
            max_tokens: 2048,
            temperature: 0.5,
            top_p: 1.0,
            n: 1,
            logprobs: None,
            echo: false,
            stop: None,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            best_of: 1,
            logit_bias: Some(BTreeMap::new()),
            user: Some(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let params = GenerationParameters::default();

        assert_eq!(params.suffix, None);
        assert_eq!(params.max_tokens, 2048);
        assert_eq!(params.temperature, 0.5);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.n, 1);
        assert_eq!(params.logprobs, None);
        assert!(!params.echo);
        assert_eq!(params.stop, None);
        assert_eq!(params.presence_penalty, 0.0);
        assert_eq!(params.frequency_penalty, 0.0);
        assert_eq!(params.best_of, 1);
        assert_eq!(params.logit_bias, Some(BTreeMap::new()));
        assert_eq!(params.user.as_deref(), Some(""));
    }

    #[test]
    fn stop_sequence_serializes_untagged() {
        let single = StopSequence::from("\n");
        let multiple = StopSequence::from(vec!["END", "###"]);

        assert_eq!(serde_json::to_value(&single).unwrap(), json!("\n"));
        assert_eq!(
            serde_json::to_value(&multiple).unwrap(),
            json!(["END", "###"])
        );
    }

    #[test]
    fn stop_sequence_deserializes_both_shapes() {
        let single: StopSequence = serde_json::from_value(json!("stop")).unwrap();
        let multiple: StopSequence = serde_json::from_value(json!(["a", "b"])).unwrap();

        assert_eq!(single, StopSequence::Single("stop".to_string()));
        assert_eq!(
            multiple,
            StopSequence::Multiple(vec!["a".to_string(), "b".to_string()])
        );
    }
}
