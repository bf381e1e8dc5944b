//! `/v1/completions`

use super::shared::{timestamp, ModelId, TextInput, Usage};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text completion request.
///
/// Only `model` is required; everything else is omitted from the wire unless set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCreate {
    pub model: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<TextInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<TextInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_of: Option<u32>,
    /// Token id (as a string) to bias in [-100, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

crate::wire_record!(
    CompletionCreate,
    "ccr",
    [
        "Model",
        "Prompt",
        "Suffix",
        "MaxTokens",
        "Temperature",
        "TopP",
        "N",
        "Logprobs",
        "Echo",
        "Stop",
        "PresencePenalty",
        "FrequencyPenalty",
        "BestOf",
        "LogitBias",
        "User",
    ]
);

impl CompletionCreate {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            prompt: None,
            suffix: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            n: None,
            logprobs: None,
            echo: None,
            stop: None,
            presence_penalty: None,
            frequency_penalty: None,
            best_of: None,
            logit_bias: None,
            user: None,
        }
    }
}

optional_into_setters!(CompletionCreate {
    prompt: TextInput,
    suffix: String,
    stop: TextInput,
    user: String,
});

optional_setters!(CompletionCreate {
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    n: u32,
    logprobs: u32,
    echo: bool,
    presence_penalty: f64,
    frequency_penalty: f64,
    best_of: u32,
    logit_bias: BTreeMap<String, f64>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: ModelId,
    pub choices: Vec<CompletionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

crate::wire_record!(
    CompletionResponse,
    "crs",
    ["ID", "Object", "Created", "Model", "Choices", "Usage"]
);

impl CompletionResponse {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<Logprobs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

crate::wire_record!(
    CompletionChoice,
    "cch",
    ["Text", "Index", "Logprobs", "FinishReason"]
);

/// Per-token log probabilities, present when the request set `logprobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logprobs {
    pub tokens: Vec<String>,
    /// The first token of an echoed prompt has no log probability.
    pub token_logprobs: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<Vec<Option<BTreeMap<String, f64>>>>,
    pub text_offset: Vec<u32>,
}

crate::wire_record!(
    Logprobs,
    "lp",
    ["Tokens", "TokenLogprobs", "TopLogprobs", "TextOffset"]
);

impl OpenAIClient {
    /// Create a completion for the prompt and parameters in `request`.
    pub async fn create_completion(
        &self,
        request: &CompletionCreate,
    ) -> OpenAIResult<CompletionResponse> {
        self.post("/v1/completions", request).await
    }
}
