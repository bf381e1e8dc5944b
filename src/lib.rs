//! # openai-client
//!
//! Typed client bindings for the OpenAI REST API.
//!
//! ## Key Features
//!
//! - **Typed records**: one request/response pair per endpoint (models, engines,
//!   completions, chat, edits, embeddings, files, fine-tunes, search, answers)
//! - **Field-name codec**: every record declares a prefixed field table that
//!   maps to the API's snake_case wire names; unknown wire fields are ignored
//! - **Two error kinds**: client-side failures versus decoded API error objects
//! - **Pluggable transport**: `reqwest` by default, any [`Transport`] for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_client::{ChatCompletionCreate, ChatMessage, ClientConfig, ModelId, OpenAIClient};
//!
//! # async fn example() -> openai_client::OpenAIResult<()> {
//! let client = OpenAIClient::new(ClientConfig::new("your-api-key"))?;
//! let request = ChatCompletionCreate::new(
//!     ModelId::new("gpt-3.5-turbo")?,
//!     vec![ChatMessage::user("Hello, how are you?")],
//! );
//! let response = client.create_chat_completion(&request).await?;
//! println!("{}", response.first_content().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub(crate) mod internals;
pub mod resources;
pub mod transport;

#[cfg(test)]
pub mod tests;

pub use client::OpenAIClient;
pub use codec::{FieldNameError, FieldTable, WireRecord};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{
    ApiErrorObject, ErrorCategory, ErrorKind, ErrorSeverity, OpenAIError, OpenAIResult,
};
pub use internals::retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport};

pub use resources::{
    AnswerCreate, AnswerResponse, ChatChoice, ChatCompletionCreate, ChatCompletionResponse,
    ChatMessage, ChatRole, CompletionChoice, CompletionCreate, CompletionResponse,
    DeleteConfirmation, EditChoice, EditCreate, EditResponse, Embedding, EmbeddingCreate,
    EmbeddingResponse, Engine, EngineId, FileCreate, FileId, FileObject, FineTune, FineTuneCreate,
    FineTuneEvent, FineTuneHyperparams, FineTuneId, ListResponse, Logprobs, Model, ModelId,
    ModelPermission, SearchCreate, SearchResponse, SearchResult, SelectedDocument, TextInput,
    Usage,
};
