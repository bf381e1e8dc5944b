//! API resources
//!
//! One module per endpoint family. Each module declares the request/response
//! records, their field tables, and the `OpenAIClient` methods that call the
//! endpoint:
//!
//! - **models** / **engines**: catalog lookups
//! - **completions** / **chat** / **edits**: text generation
//! - **embeddings**: vector embeddings
//! - **files**: upload (multipart), listing, content download, deletion
//! - **fine_tunes**: fine-tune job lifecycle and events
//! - **search** / **answers**: document search and question answering
//! - **shared**: identifiers, usage, list envelopes

/// Chainable setters for optional request fields that take the value as-is.
macro_rules! optional_setters {
    ($ty:ty { $($field:ident: $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $field(mut self, value: $value) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*
        }
    };
}

/// Chainable setters for optional request fields that accept anything convertible.
macro_rules! optional_into_setters {
    ($ty:ty { $($field:ident: $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $field(mut self, value: impl Into<$value>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

pub mod answers;
pub mod chat;
pub mod completions;
pub mod edits;
pub mod embeddings;
pub mod engines;
pub mod files;
pub mod fine_tunes;
pub mod models;
pub mod search;
pub mod shared;

pub use answers::{AnswerCreate, AnswerResponse, SelectedDocument};
pub use chat::{ChatChoice, ChatCompletionCreate, ChatCompletionResponse, ChatMessage, ChatRole};
pub use completions::{CompletionChoice, CompletionCreate, CompletionResponse, Logprobs};
pub use edits::{EditChoice, EditCreate, EditResponse};
pub use embeddings::{Embedding, EmbeddingCreate, EmbeddingResponse};
pub use engines::Engine;
pub use files::{FileCreate, FileObject};
pub use fine_tunes::{FineTune, FineTuneCreate, FineTuneEvent, FineTuneHyperparams};
pub use models::{Model, ModelPermission};
pub use search::{SearchCreate, SearchResponse, SearchResult};
pub use shared::{
    timestamp, DeleteConfirmation, EngineId, FileId, FineTuneId, ListResponse, ModelId, TextInput,
    Usage,
};
