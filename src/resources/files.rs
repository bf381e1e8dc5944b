//! `/v1/files`
//!
//! Uploads go out as `multipart/form-data`; the form-field names come from the
//! same field table that names JSON fields elsewhere.

use super::shared::{timestamp, DeleteConfirmation, FileId, ListResponse};
use crate::client::OpenAIClient;
use crate::codec::WireRecord;
use crate::error::{OpenAIError, OpenAIResult};
use crate::logging::log_info;
use crate::transport::{FilePart, MultipartBody};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: FileId,
    pub object: String,
    pub bytes: u64,
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
}

crate::wire_record!(
    FileObject,
    "fo",
    [
        "ID",
        "Object",
        "Bytes",
        "CreatedAt",
        "Filename",
        "Purpose",
        "Status",
        "StatusDetails",
    ]
);

impl FileObject {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created_at)
    }
}

/// A file to upload, e.g. JSONL training data with purpose `fine-tune`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileCreate {
    pub file_name: String,
    pub content: Vec<u8>,
    pub purpose: String,
}

crate::wire_record!(FileCreate, "fc", ["File", "Purpose"]);

impl FileCreate {
    pub fn new(
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            purpose: purpose.into(),
        }
    }

    /// Read `path` into memory; the upload is named after the path's file name.
    pub async fn from_path(path: impl AsRef<Path>, purpose: impl Into<String>) -> OpenAIResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                OpenAIError::invalid_request(format!("{} has no usable file name", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|e| {
            OpenAIError::invalid_request(format!("failed to read {}: {e}", path.display()))
        })?;

        Ok(Self::new(file_name, content, purpose))
    }

    /// Build the multipart body, naming the form fields through the field table.
    pub(crate) fn to_multipart(&self) -> OpenAIResult<MultipartBody> {
        let table = Self::field_table()?;
        let field = |internal: &str| {
            table.wire_name_of(internal).map(str::to_string).ok_or_else(|| {
                OpenAIError::encoding_error(format!("FileCreate has no field {internal}"))
            })
        };

        Ok(MultipartBody {
            text_fields: vec![(field("fcPurpose")?, self.purpose.clone())],
            file: FilePart {
                field_name: field("fcFile")?,
                file_name: self.file_name.clone(),
                bytes: self.content.clone(),
            },
        })
    }
}

impl OpenAIClient {
    pub async fn list_files(&self) -> OpenAIResult<ListResponse<FileObject>> {
        self.get("/v1/files").await
    }

    /// Upload a file in one multipart round trip.
    pub async fn upload_file(&self, request: &FileCreate) -> OpenAIResult<FileObject> {
        if request.purpose.is_empty() {
            return Err(OpenAIError::invalid_request("file purpose must not be empty"));
        }

        let body = request.to_multipart()?;
        let file: FileObject = self.post_multipart("/v1/files", body).await?;

        log_info!(
            file_id = %file.id,
            bytes = file.bytes,
            purpose = %file.purpose,
            "File uploaded"
        );
        Ok(file)
    }

    pub async fn retrieve_file(&self, id: &FileId) -> OpenAIResult<FileObject> {
        self.get(&format!("/v1/files/{id}")).await
    }

    /// Raw contents of an uploaded file.
    pub async fn retrieve_file_content(&self, id: &FileId) -> OpenAIResult<Vec<u8>> {
        self.get_bytes(&format!("/v1/files/{id}/content")).await
    }

    pub async fn delete_file(&self, id: &FileId) -> OpenAIResult<DeleteConfirmation> {
        self.delete(&format!("/v1/files/{id}")).await
    }
}
