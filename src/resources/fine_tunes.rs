//! `/v1/fine-tunes`

use super::files::FileObject;
use super::shared::{timestamp, FileId, FineTuneId, ListResponse, ModelId};
use crate::client::OpenAIClient;
use crate::error::OpenAIResult;
use crate::logging::log_info;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuneCreate {
    pub training_file: FileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_betas: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

crate::wire_record!(
    FineTuneCreate,
    "ftc",
    [
        "TrainingFile",
        "ValidationFile",
        "Model",
        "NEpochs",
        "BatchSize",
        "LearningRateMultiplier",
        "PromptLossWeight",
        "ComputeClassificationMetrics",
        "ClassificationNClasses",
        "ClassificationPositiveClass",
        "ClassificationBetas",
        "Suffix",
    ]
);

impl FineTuneCreate {
    pub fn new(training_file: FileId) -> Self {
        Self {
            training_file,
            validation_file: None,
            model: None,
            n_epochs: None,
            batch_size: None,
            learning_rate_multiplier: None,
            prompt_loss_weight: None,
            compute_classification_metrics: None,
            classification_n_classes: None,
            classification_positive_class: None,
            classification_betas: None,
            suffix: None,
        }
    }
}

optional_into_setters!(FineTuneCreate {
    classification_positive_class: String,
    suffix: String,
});

optional_setters!(FineTuneCreate {
    validation_file: FileId,
    model: ModelId,
    n_epochs: u32,
    batch_size: u32,
    learning_rate_multiplier: f64,
    prompt_loss_weight: f64,
    compute_classification_metrics: bool,
    classification_n_classes: u32,
    classification_betas: Vec<f64>,
});

/// Hyperparameters a job ran with; the service fills in the ones left unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuneHyperparams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>,
}

crate::wire_record!(
    FineTuneHyperparams,
    "fth",
    [
        "BatchSize",
        "LearningRateMultiplier",
        "NEpochs",
        "PromptLossWeight",
    ]
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTune {
    pub id: FineTuneId,
    pub object: String,
    pub model: ModelId,
    pub created_at: i64,
    /// Only returned by create and retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<FineTuneEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine_tuned_model: Option<ModelId>,
    pub hyperparams: FineTuneHyperparams,
    pub organization_id: String,
    pub result_files: Vec<FileObject>,
    pub status: String,
    pub validation_files: Vec<FileObject>,
    pub training_files: Vec<FileObject>,
    pub updated_at: i64,
}

crate::wire_record!(
    FineTune,
    "ft",
    [
        "ID",
        "Object",
        "Model",
        "CreatedAt",
        "Events",
        "FineTunedModel",
        "Hyperparams",
        "OrganizationID",
        "ResultFiles",
        "Status",
        "ValidationFiles",
        "TrainingFiles",
        "UpdatedAt",
    ]
);

impl FineTune {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created_at)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        timestamp(self.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineTuneEvent {
    pub object: String,
    pub created_at: i64,
    pub level: String,
    pub message: String,
}

crate::wire_record!(
    FineTuneEvent,
    "fte",
    ["Object", "CreatedAt", "Level", "Message"]
);

impl OpenAIClient {
    pub async fn create_fine_tune(&self, request: &FineTuneCreate) -> OpenAIResult<FineTune> {
        let job: FineTune = self.post("/v1/fine-tunes", request).await?;
        log_info!(
            fine_tune_id = %job.id,
            training_file = %request.training_file,
            status = %job.status,
            "Fine-tune job created"
        );
        Ok(job)
    }

    pub async fn list_fine_tunes(&self) -> OpenAIResult<ListResponse<FineTune>> {
        self.get("/v1/fine-tunes").await
    }

    pub async fn retrieve_fine_tune(&self, id: &FineTuneId) -> OpenAIResult<FineTune> {
        self.get(&format!("/v1/fine-tunes/{id}")).await
    }

    pub async fn cancel_fine_tune(&self, id: &FineTuneId) -> OpenAIResult<FineTune> {
        self.post_empty(&format!("/v1/fine-tunes/{id}/cancel"))
            .await
    }

    pub async fn list_fine_tune_events(
        &self,
        id: &FineTuneId,
    ) -> OpenAIResult<ListResponse<FineTuneEvent>> {
        self.get(&format!("/v1/fine-tunes/{id}/events")).await
    }
}
