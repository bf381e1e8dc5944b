//! `/v1/engines`

use super::shared::{timestamp, EngineId, ListResponse};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub id: EngineId,
    pub object: String,
    pub owner: String,
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

crate::wire_record!(Engine, "eng", ["ID", "Object", "Owner", "Ready", "Created"]);

impl Engine {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(timestamp)
    }
}

impl OpenAIClient {
    pub async fn list_engines(&self) -> OpenAIResult<ListResponse<Engine>> {
        self.get("/v1/engines").await
    }

    pub async fn retrieve_engine(&self, id: &EngineId) -> OpenAIResult<Engine> {
        self.get(&format!("/v1/engines/{id}")).await
    }
}
