//! `/v1/answers`

use super::shared::{FileId, ModelId, TextInput};
use crate::client::OpenAIClient;
use crate::error::{OpenAIError, OpenAIResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answer `question` from `documents` (or an uploaded `file`), steered by
/// `examples` of question/answer pairs drawn from `examples_context`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCreate {
    pub model: ModelId,
    pub question: String,
    pub examples: Vec<(String, String)>,
    pub examples_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_model: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rerank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<TextInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_prompt: Option<bool>,
    /// Extra response fields to include, e.g. `completion`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

crate::wire_record!(
    AnswerCreate,
    "ac",
    [
        "Model",
        "Question",
        "Examples",
        "ExamplesContext",
        "Documents",
        "File",
        "SearchModel",
        "MaxRerank",
        "Temperature",
        "Logprobs",
        "MaxTokens",
        "Stop",
        "N",
        "LogitBias",
        "ReturnMetadata",
        "ReturnPrompt",
        "Expand",
        "User",
    ]
);

impl AnswerCreate {
    pub fn new(
        model: ModelId,
        question: impl Into<String>,
        examples: Vec<(String, String)>,
        examples_context: impl Into<String>,
    ) -> Self {
        Self {
            model,
            question: question.into(),
            examples,
            examples_context: examples_context.into(),
            documents: None,
            file: None,
            search_model: None,
            max_rerank: None,
            temperature: None,
            logprobs: None,
            max_tokens: None,
            stop: None,
            n: None,
            logit_bias: None,
            return_metadata: None,
            return_prompt: None,
            expand: None,
            user: None,
        }
    }
}

optional_into_setters!(AnswerCreate {
    stop: TextInput,
    user: String,
});

optional_setters!(AnswerCreate {
    documents: Vec<String>,
    file: FileId,
    search_model: ModelId,
    max_rerank: u32,
    temperature: f64,
    logprobs: u32,
    max_tokens: u32,
    n: u32,
    logit_bias: BTreeMap<String, f64>,
    return_metadata: bool,
    return_prompt: bool,
    expand: Vec<String>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
    pub model: ModelId,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_model: Option<ModelId>,
    pub selected_documents: Vec<SelectedDocument>,
    /// Only present when `return_prompt` was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

crate::wire_record!(
    AnswerResponse,
    "ar",
    [
        "Answers",
        "Completion",
        "Model",
        "Object",
        "SearchModel",
        "SelectedDocuments",
        "Prompt",
    ]
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDocument {
    pub document: u32,
    pub text: String,
}

crate::wire_record!(SelectedDocument, "sd", ["Document", "Text"]);

impl OpenAIClient {
    /// # Errors
    ///
    /// Returns [`OpenAIError::InvalidRequest`] unless exactly one of
    /// `documents` and `file` is set.
    pub async fn create_answer(&self, request: &AnswerCreate) -> OpenAIResult<AnswerResponse> {
        if request.documents.is_some() == request.file.is_some() {
            return Err(OpenAIError::invalid_request(
                "answers need exactly one of `documents` or `file`",
            ));
        }
        self.post("/v1/answers", request).await
    }
}
