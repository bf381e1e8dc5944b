//! `/v1/engines/{engine_id}/search`

use super::shared::{EngineId, FileId};
use crate::client::OpenAIClient;
use crate::error::{OpenAIError, OpenAIResult};
use serde::{Deserialize, Serialize};

/// Rank `documents` (or the documents of an uploaded `file`) against `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileId>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rerank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

crate::wire_record!(
    SearchCreate,
    "sc",
    ["Documents", "File", "Query", "MaxRerank", "ReturnMetadata", "User"]
);

impl SearchCreate {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            documents: None,
            file: None,
            query: query.into(),
            max_rerank: None,
            return_metadata: None,
            user: None,
        }
    }
}

optional_into_setters!(SearchCreate { user: String });

optional_setters!(SearchCreate {
    documents: Vec<String>,
    file: FileId,
    max_rerank: u32,
    return_metadata: bool,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub object: String,
    pub data: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

crate::wire_record!(SearchResponse, "sr", ["Object", "Data", "Model"]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Index into the request's documents
    pub document: u32,
    pub object: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

crate::wire_record!(
    SearchResult,
    "sres",
    ["Document", "Object", "Score", "Text", "Metadata"]
);

impl OpenAIClient {
    /// Search with the given engine.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAIError::InvalidRequest`] unless exactly one of
    /// `documents` and `file` is set.
    pub async fn search(
        &self,
        engine: &EngineId,
        request: &SearchCreate,
    ) -> OpenAIResult<SearchResponse> {
        if request.documents.is_some() == request.file.is_some() {
            return Err(OpenAIError::invalid_request(
                "search needs exactly one of `documents` or `file`",
            ));
        }
        self.post(&format!("/v1/engines/{engine}/search"), request)
            .await
    }
}
