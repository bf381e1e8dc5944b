//! Types shared across resources: identifiers, usage, list envelopes.

use crate::codec::WireRecord;
use crate::error::{OpenAIError, OpenAIResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PATH_DELIMITERS: [char; 3] = ['/', '?', '#'];

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a non-empty identifier.
            ///
            /// Identifiers become URL path segments, so `/`, `?` and `#` are refused.
            pub fn new(value: impl Into<String>) -> OpenAIResult<Self> {
                let value = value.into();
                if value.is_empty() {
                    return Err(OpenAIError::invalid_request(concat!(
                        $label,
                        " must not be empty"
                    )));
                }
                if let Some(c) = value.chars().find(|c| PATH_DELIMITERS.contains(c)) {
                    return Err(OpenAIError::invalid_request(format!(
                        concat!($label, " `{}` contains `{}`, which would change the request path"),
                        value, c
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = OpenAIError;

            fn try_from(value: String) -> OpenAIResult<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = OpenAIError;

            fn try_from(value: &str) -> OpenAIResult<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Model name, e.g. `text-davinci-003` or a fine-tuned model id.
    ModelId,
    "model id"
);
identifier!(
    /// Engine name, e.g. `davinci`.
    EngineId,
    "engine id"
);
identifier!(
    /// Uploaded file id, e.g. `file-XjGxS3KTG0uNmNOK362iJua3`.
    FileId,
    "file id"
);
identifier!(
    /// Fine-tune job id, e.g. `ft-AF1WoRqd3aJAHsqc9NY7iL8F`.
    FineTuneId,
    "fine-tune id"
);

/// Convert a unix timestamp in seconds.
pub fn timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Text fields the API accepts either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for TextInput {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Token accounting attached to generation responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    /// Absent for embeddings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

crate::wire_record!(Usage, "usg", ["PromptTokens", "CompletionTokens", "TotalTokens"]);

/// `{"object": "list", "data": [...]}` envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub object: String,
    pub data: Vec<T>,
}

impl<T> WireRecord for ListResponse<T> {
    const FIELD_PREFIX: &'static str = "lr";
    const FIELDS: &'static [&'static str] = &["lrObject", "lrData"];
}

impl<T> ListResponse<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}

crate::wire_record!(DeleteConfirmation, "dc", ["ID", "Object", "Deleted"]);
