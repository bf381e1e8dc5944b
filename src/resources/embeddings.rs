//! `/v1/embeddings`

use super::shared::{ModelId, TextInput, Usage};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingCreate {
    pub model: ModelId,
    pub input: TextInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

crate::wire_record!(EmbeddingCreate, "emc", ["Model", "Input", "User"]);

impl EmbeddingCreate {
    pub fn new(model: ModelId, input: impl Into<TextInput>) -> Self {
        Self {
            model,
            input: input.into(),
            user: None,
        }
    }
}

optional_into_setters!(EmbeddingCreate { user: String });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub object: String,
    pub data: Vec<Embedding>,
    pub model: ModelId,
    pub usage: Usage,
}

crate::wire_record!(EmbeddingResponse, "emr", ["Object", "Data", "Model", "Usage"]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub object: String,
    pub embedding: Vec<f64>,
    /// Position of the matching input
    pub index: u32,
}

crate::wire_record!(Embedding, "emb", ["Object", "Embedding", "Index"]);

impl OpenAIClient {
    pub async fn create_embedding(
        &self,
        request: &EmbeddingCreate,
    ) -> OpenAIResult<EmbeddingResponse> {
        self.post("/v1/embeddings", request).await
    }
}
