//! `/v1/edits`

use super::shared::{timestamp, ModelId, Usage};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rewrite `input` following `instruction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditCreate {
    pub model: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

crate::wire_record!(
    EditCreate,
    "ec",
    ["Model", "Input", "Instruction", "N", "Temperature", "TopP"]
);

impl EditCreate {
    pub fn new(model: ModelId, instruction: impl Into<String>) -> Self {
        Self {
            model,
            input: None,
            instruction: instruction.into(),
            n: None,
            temperature: None,
            top_p: None,
        }
    }
}

optional_into_setters!(EditCreate { input: String });

optional_setters!(EditCreate {
    n: u32,
    temperature: f64,
    top_p: f64,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditResponse {
    pub object: String,
    pub created: i64,
    pub choices: Vec<EditChoice>,
    pub usage: Usage,
}

crate::wire_record!(EditResponse, "er", ["Object", "Created", "Choices", "Usage"]);

impl EditResponse {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditChoice {
    pub text: String,
    pub index: u32,
}

crate::wire_record!(EditChoice, "ech", ["Text", "Index"]);

impl OpenAIClient {
    pub async fn create_edit(&self, request: &EditCreate) -> OpenAIResult<EditResponse> {
        self.post("/v1/edits", request).await
    }
}
