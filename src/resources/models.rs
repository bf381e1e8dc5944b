//! `/v1/models`

use super::shared::{timestamp, DeleteConfirmation, ListResponse, ModelId};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    pub owned_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Vec<ModelPermission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

crate::wire_record!(
    Model,
    "mdl",
    ["ID", "Object", "Created", "OwnedBy", "Permission", "Root", "Parent"]
);

impl Model {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPermission {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub allow_create_engine: bool,
    pub allow_sampling: bool,
    pub allow_logprobs: bool,
    pub allow_search_indices: bool,
    pub allow_view: bool,
    pub allow_fine_tuning: bool,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub is_blocking: bool,
}

crate::wire_record!(
    ModelPermission,
    "mp",
    [
        "ID",
        "Object",
        "Created",
        "AllowCreateEngine",
        "AllowSampling",
        "AllowLogprobs",
        "AllowSearchIndices",
        "AllowView",
        "AllowFineTuning",
        "Organization",
        "Group",
        "IsBlocking",
    ]
);

impl OpenAIClient {
    /// List the models available to the account.
    pub async fn list_models(&self) -> OpenAIResult<ListResponse<Model>> {
        self.get("/v1/models").await
    }

    pub async fn retrieve_model(&self, id: &ModelId) -> OpenAIResult<Model> {
        self.get(&format!("/v1/models/{id}")).await
    }

    /// Delete a fine-tuned model owned by the caller's organization.
    pub async fn delete_model(&self, id: &ModelId) -> OpenAIResult<DeleteConfirmation> {
        self.delete(&format!("/v1/models/{id}")).await
    }
}
