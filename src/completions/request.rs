use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{GenerationParameters, StopSequence};

/// Wire body for a single completion call.
///
/// Every field is always present; absent optionals go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub suffix: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub n: u32,
    pub logprobs: Option<u32>,
    pub echo: bool,
    pub stop: Option<StopSequence>,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub best_of: u32,
    pub logit_bias: Option<BTreeMap<String, f64>>,
    pub user: Option<String>,
    stream: bool,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        parameters: &GenerationParameters,
    ) -> Self {
        let GenerationParameters {
            suffix,
            max_tokens,
            temperature,
            top_p,
            n,
            logprobs,
            echo,
            stop,
            presence_penalty,
            frequency_penalty,
            best_of,
            logit_bias,
            user,
        } = parameters.clone();

        Self {
            model: model.into(),
            prompt: prompt.into(),
            suffix,
            max_tokens,
            temperature,
            top_p,
            n,
            logprobs,
            echo,
            stop,
            presence_penalty,
            frequency_penalty,
            best_of,
            logit_bias,
            user,
            stream: false,
        }
    }

    /// Always `false`: streaming is not supported.
    pub fn stream(&self) -> bool {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_parameters_serialize_every_field() {
        let request =
            CompletionRequest::new("test-model", "hello", &GenerationParameters::default());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "test-model",
                "prompt": "hello",
                "suffix": null,
                "max_tokens": 2048,
                "temperature": 0.5,
                "top_p": 1.0,
                "n": 1,
                "logprobs": null,
                "echo": false,
                "stop": null,
                "presence_penalty": 0.0,
                "frequency_penalty": 0.0,
                "best_of": 1,
                "logit_bias": {},
                "user": "",
                "stream": false
            })
        );
    }

    #[test]
    fn stop_list_and_bias_serialize_as_given() {
        let mut bias = BTreeMap::new();
        bias.insert("50256".to_string(), -100.0);
        let params = GenerationParameters {
            stop: Some(vec!["END", "\n"].into()),
            logit_bias: Some(bias),
            user: None,
            ..Default::default()
        };

        let body = serde_json::to_value(CompletionRequest::new("m", "p", &params)).unwrap();

        assert_eq!(body["stop"], json!(["END", "\n"]));
        assert_eq!(body["logit_bias"], json!({ "50256": -100.0 }));
        assert_eq!(body["user"], json!(null));
        assert_eq!(body["stream"], json!(false));
    }

    #[test]
    fn empty_prompt_passes_through() {
        let request = CompletionRequest::new("m", "", &GenerationParameters::default());
        assert_eq!(request.prompt, "");
        assert!(!request.stream());
    }
}
