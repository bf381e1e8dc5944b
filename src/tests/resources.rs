// Unit Tests for API Resource Records
//
// UNIT UNDER TEST: resources::* records and their field tables
//
// BUSINESS RESPONSIBILITY:
//   - Every record declares an injective field table
//   - Every serialized key of every record is covered by its table
//   - Identifiers, text inputs and timestamps keep their wire shapes
//   - Search and answers refuse requests without exactly one document source
//
// TEST COVERAGE:
//   - Fully populated fixture per record: decode, re-encode, compare keys to the table
//   - Requests with only their required fields survive encode then decode
//   - Multipart field naming for uploads
//   - Identifier newtypes and untagged text inputs
//   - Client-side validation on search and answers

use crate::client::OpenAIClient;
use crate::codec::{decode_value, encode, WireRecord};
use crate::error::{ApiErrorEnvelope, ApiErrorObject, OpenAIError};
use crate::resources::*;
use crate::tests::helpers::create_test_config;
use crate::transport::MockTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Decode `fixture`, re-encode it, and check the emitted keys are exactly the
/// table's wire names and that decoding the encoded form gives the same record.
fn assert_table_covers_record<T>(fixture: Value)
where
    T: WireRecord + Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let table = T::field_table().unwrap();
    let record: T = decode_value(fixture).unwrap();
    let encoded = encode(&record).unwrap();

    let emitted: BTreeSet<&str> = encoded
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    let declared: BTreeSet<&str> = table.wire_names().collect();

    assert_eq!(
        emitted,
        declared,
        "{} keys differ from its field table",
        std::any::type_name::<T>()
    );

    let decoded: T = decode_value(encoded).unwrap();
    assert_eq!(decoded, record, "{} changed across encode", std::any::type_name::<T>());
}

/// Encode `record` and decode it back unchanged.
fn assert_round_trip<T>(record: T)
where
    T: WireRecord + Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let encoded = encode(&record).unwrap();
    let decoded: T = decode_value(encoded).unwrap();

    assert_eq!(decoded, record);
}

fn usage() -> Value {
    json!({"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12})
}

fn file_object() -> Value {
    json!({
        "id": "file-abc",
        "object": "file",
        "bytes": 140,
        "created_at": 1_613_779_121,
        "filename": "train.jsonl",
        "purpose": "fine-tune",
        "status": "processed",
        "status_details": "ok"
    })
}

fn fine_tune_event() -> Value {
    json!({
        "object": "fine-tune-event",
        "created_at": 1_614_807_352,
        "level": "info",
        "message": "Job enqueued"
    })
}

#[cfg(test)]
mod field_table_coverage_tests {
    use super::*;

    #[test]
    fn test_shared_records() {
        assert_table_covers_record::<Usage>(usage());
        assert_table_covers_record::<DeleteConfirmation>(
            json!({"id": "file-abc", "object": "file", "deleted": true}),
        );
        assert_table_covers_record::<ListResponse<Usage>>(
            json!({"object": "list", "data": [usage()]}),
        );
    }

    #[test]
    fn test_error_records() {
        let object = json!({
            "message": "bad",
            "type": "invalid_request_error",
            "param": "prompt",
            "code": "invalid_value"
        });
        assert_table_covers_record::<ApiErrorObject>(object.clone());
        assert_table_covers_record::<ApiErrorEnvelope>(json!({"error": object}));
    }

    #[test]
    fn test_model_records() {
        let permission = json!({
            "id": "modelperm-1",
            "object": "model_permission",
            "created": 1_669_085_501,
            "allow_create_engine": false,
            "allow_sampling": true,
            "allow_logprobs": true,
            "allow_search_indices": false,
            "allow_view": true,
            "allow_fine_tuning": false,
            "organization": "*",
            "group": "g",
            "is_blocking": false
        });
        assert_table_covers_record::<ModelPermission>(permission.clone());
        assert_table_covers_record::<Model>(json!({
            "id": "text-davinci-003",
            "object": "model",
            "created": 1_669_599_635,
            "owned_by": "openai-internal",
            "permission": [permission],
            "root": "text-davinci-003",
            "parent": "text-davinci-002"
        }));
    }

    #[test]
    fn test_engine_record() {
        assert_table_covers_record::<Engine>(json!({
            "id": "davinci",
            "object": "engine",
            "owner": "openai",
            "ready": true,
            "created": 1_600_000_000
        }));
    }

    #[test]
    fn test_completion_records() {
        let logprobs = json!({
            "tokens": ["Hello", "!"],
            "token_logprobs": [null, -0.25],
            "top_logprobs": [null, {"!": -0.25, ".": -1.5}],
            "text_offset": [0, 5]
        });
        let choice = json!({
            "text": "Hello!",
            "index": 0,
            "logprobs": logprobs,
            "finish_reason": "stop"
        });

        assert_table_covers_record::<Logprobs>(logprobs.clone());
        assert_table_covers_record::<CompletionChoice>(choice.clone());
        assert_table_covers_record::<CompletionResponse>(json!({
            "id": "cmpl-1",
            "object": "text_completion",
            "created": 1_589_478_378,
            "model": "text-davinci-003",
            "choices": [choice],
            "usage": usage()
        }));
        assert_table_covers_record::<CompletionCreate>(json!({
            "model": "text-davinci-003",
            "prompt": ["a", "b"],
            "suffix": "end",
            "max_tokens": 16,
            "temperature": 0.5,
            "top_p": 1.0,
            "n": 2,
            "logprobs": 3,
            "echo": true,
            "stop": "\n",
            "presence_penalty": 0.1,
            "frequency_penalty": 0.2,
            "best_of": 4,
            "logit_bias": {"50256": -100.0},
            "user": "user-1"
        }));
    }

    #[test]
    fn test_chat_records() {
        let message = json!({"role": "assistant", "content": "Hi", "name": "bot"});
        let choice = json!({"index": 0, "message": message, "finish_reason": "stop"});

        assert_table_covers_record::<ChatMessage>(message.clone());
        assert_table_covers_record::<ChatChoice>(choice.clone());
        assert_table_covers_record::<ChatCompletionResponse>(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_677_652_288,
            "model": "gpt-3.5-turbo",
            "choices": [choice],
            "usage": usage()
        }));
        assert_table_covers_record::<ChatCompletionCreate>(json!({
            "model": "gpt-3.5-turbo",
            "messages": [message],
            "temperature": 0.7,
            "top_p": 0.9,
            "n": 1,
            "stop": ["\n"],
            "max_tokens": 64,
            "presence_penalty": 0.0,
            "frequency_penalty": 0.5,
            "logit_bias": {"1": 2.0},
            "user": "user-1"
        }));
    }

    #[test]
    fn test_edit_records() {
        let choice = json!({"text": "What day is it?", "index": 0});

        assert_table_covers_record::<EditChoice>(choice.clone());
        assert_table_covers_record::<EditResponse>(json!({
            "object": "edit",
            "created": 1_589_478_378,
            "choices": [choice],
            "usage": usage()
        }));
        assert_table_covers_record::<EditCreate>(json!({
            "model": "text-davinci-edit-001",
            "input": "What day of the wek is it?",
            "instruction": "Fix the spelling mistakes",
            "n": 1,
            "temperature": 0.0,
            "top_p": 1.0
        }));
    }

    #[test]
    fn test_embedding_records() {
        let embedding = json!({"object": "embedding", "embedding": [0.1, -0.2], "index": 0});

        assert_table_covers_record::<Embedding>(embedding.clone());
        assert_table_covers_record::<EmbeddingResponse>(json!({
            "object": "list",
            "data": [embedding],
            "model": "text-embedding-ada-002",
            "usage": usage()
        }));
        assert_table_covers_record::<EmbeddingCreate>(json!({
            "model": "text-embedding-ada-002",
            "input": "The food was delicious",
            "user": "user-1"
        }));
    }

    #[test]
    fn test_file_record() {
        assert_table_covers_record::<FileObject>(file_object());
    }

    #[test]
    fn test_fine_tune_records() {
        let hyperparams = json!({
            "batch_size": 4,
            "learning_rate_multiplier": 0.1,
            "n_epochs": 4,
            "prompt_loss_weight": 0.01
        });

        assert_table_covers_record::<FineTuneEvent>(fine_tune_event());
        assert_table_covers_record::<FineTuneHyperparams>(hyperparams.clone());
        assert_table_covers_record::<FineTune>(json!({
            "id": "ft-1",
            "object": "fine-tune",
            "model": "curie",
            "created_at": 1_614_807_352,
            "events": [fine_tune_event()],
            "fine_tuned_model": "curie:ft-acme-2021-03-03",
            "hyperparams": hyperparams,
            "organization_id": "org-1",
            "result_files": [file_object()],
            "status": "succeeded",
            "validation_files": [],
            "training_files": [file_object()],
            "updated_at": 1_614_807_865
        }));
        assert_table_covers_record::<FineTuneCreate>(json!({
            "training_file": "file-abc",
            "validation_file": "file-def",
            "model": "curie",
            "n_epochs": 4,
            "batch_size": 8,
            "learning_rate_multiplier": 0.05,
            "prompt_loss_weight": 0.01,
            "compute_classification_metrics": true,
            "classification_n_classes": 3,
            "classification_positive_class": " yes",
            "classification_betas": [0.5, 1.0],
            "suffix": "custom"
        }));
    }

    #[test]
    fn test_search_records() {
        let result = json!({
            "document": 0,
            "object": "search_result",
            "score": 215.4,
            "text": "White House",
            "metadata": "{\"source\": \"wiki\"}"
        });

        assert_table_covers_record::<SearchResult>(result.clone());
        assert_table_covers_record::<SearchResponse>(json!({
            "object": "list",
            "data": [result],
            "model": "davinci:2020-05-03"
        }));
        assert_table_covers_record::<SearchCreate>(json!({
            "documents": ["White House", "hospital"],
            "file": "file-abc",
            "query": "the president",
            "max_rerank": 200,
            "return_metadata": true,
            "user": "user-1"
        }));
    }

    #[test]
    fn test_answer_records() {
        let selected = json!({"document": 0, "text": "Puppy A is happy."});

        assert_table_covers_record::<SelectedDocument>(selected.clone());
        assert_table_covers_record::<AnswerResponse>(json!({
            "answers": ["puppy A."],
            "completion": "cmpl-2",
            "model": "curie:2020-05-03",
            "object": "answer",
            "search_model": "ada",
            "selected_documents": [selected],
            "prompt": "Please answer the question..."
        }));
        assert_table_covers_record::<AnswerCreate>(json!({
            "model": "curie",
            "question": "which puppy is happy?",
            "examples": [["What is human life expectancy?", "78 years."]],
            "examples_context": "In 2017, U.S. life expectancy was 78.6 years.",
            "documents": ["Puppy A is happy.", "Puppy B is sad."],
            "file": "file-abc",
            "search_model": "ada",
            "max_rerank": 10,
            "temperature": 0.0,
            "logprobs": 1,
            "max_tokens": 5,
            "stop": ["\n", "<|endoftext|>"],
            "n": 1,
            "logit_bias": {"50256": -100.0},
            "return_metadata": false,
            "return_prompt": true,
            "expand": ["completion"],
            "user": "user-1"
        }));
    }
}

#[cfg(test)]
mod required_fields_round_trip_tests {
    use super::*;

    fn model(id: &str) -> ModelId {
        ModelId::new(id).unwrap()
    }

    #[test]
    fn test_completion_create() {
        assert_round_trip(CompletionCreate::new(model("text-ada-001")));
    }

    #[test]
    fn test_chat_completion_create() {
        assert_round_trip(ChatCompletionCreate::new(
            model("gpt-3.5-turbo"),
            vec![ChatMessage::new(ChatRole::User, "Hello")],
        ));
    }

    #[test]
    fn test_edit_create() {
        assert_round_trip(EditCreate::new(
            model("text-davinci-edit-001"),
            "Fix the spelling mistakes",
        ));
    }

    #[test]
    fn test_embedding_create() {
        assert_round_trip(EmbeddingCreate::new(
            model("text-embedding-ada-002"),
            "The food was delicious",
        ));
        assert_round_trip(EmbeddingCreate::new(
            model("text-embedding-ada-002"),
            vec!["first", "second"],
        ));
    }

    #[test]
    fn test_fine_tune_create() {
        assert_round_trip(FineTuneCreate::new(FileId::new("file-abc").unwrap()));
    }

    #[test]
    fn test_search_create() {
        assert_round_trip(SearchCreate::new("the president"));
    }

    #[test]
    fn test_answer_create() {
        assert_round_trip(AnswerCreate::new(
            model("curie"),
            "which puppy is happy?",
            vec![(
                "What is human life expectancy?".to_string(),
                "78 years.".to_string(),
            )],
            "In 2017, U.S. life expectancy was 78.6 years.",
        ));
    }
}

#[cfg(test)]
mod upload_tests {
    use super::*;

    #[test]
    fn test_multipart_fields_use_wire_names() {
        let upload = FileCreate::new("train.jsonl", b"{\"prompt\": \"a\"}".to_vec(), "fine-tune");

        let body = upload.to_multipart().unwrap();

        assert_eq!(body.file.field_name, "file");
        assert_eq!(body.file.file_name, "train.jsonl");
        assert_eq!(body.file.bytes, upload.content);
        assert_eq!(
            body.text_fields,
            vec![("purpose".to_string(), "fine-tune".to_string())]
        );
    }

    #[tokio::test]
    async fn test_from_path_reads_file_and_name() {
        let path = std::env::temp_dir().join(format!("upload-{}.jsonl", fastrand::u64(..)));
        tokio::fs::write(&path, b"{}\n").await.unwrap();

        let upload = FileCreate::from_path(&path, "fine-tune").await.unwrap();

        assert_eq!(upload.content, b"{}\n".to_vec());
        assert_eq!(
            upload.file_name,
            path.file_name().unwrap().to_str().unwrap()
        );
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_missing_path_is_invalid_request() {
        let result = FileCreate::from_path("/definitely/not/here.jsonl", "fine-tune").await;

        assert!(matches!(result, Err(OpenAIError::InvalidRequest { .. })));
    }
}

#[cfg(test)]
mod shared_type_tests {
    use super::*;

    #[test]
    fn test_identifiers_serialize_as_plain_strings() {
        let id = FileId::new("file-abc").unwrap();

        assert_eq!(serde_json::to_value(&id).unwrap(), json!("file-abc"));
        assert_eq!(id.to_string(), "file-abc");
        assert_eq!(AsRef::<str>::as_ref(&id), "file-abc");
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        assert!(ModelId::new("").is_err());
        assert!(EngineId::try_from("").is_err());
        assert!(FineTuneId::try_from(String::new()).is_err());
        assert!(serde_json::from_value::<FileId>(json!("")).is_err());
    }

    #[test]
    fn test_identifiers_with_path_delimiters_are_rejected() {
        for value in ["file-1/content", "ft-1?x=1", "m1#frag", "../models"] {
            assert!(
                matches!(FileId::new(value), Err(OpenAIError::InvalidRequest { .. })),
                "{value} should be rejected"
            );
        }
        assert!(serde_json::from_value::<ModelId>(json!("a/b")).is_err());
    }

    #[test]
    fn test_fine_tuned_model_names_are_accepted() {
        let id = ModelId::new("curie:ft-acme-2021-03-03-21-44-20").unwrap();

        assert_eq!(id.as_str(), "curie:ft-acme-2021-03-03-21-44-20");
    }

    #[test]
    fn test_text_input_is_untagged() {
        assert_eq!(
            serde_json::to_value(TextInput::from("one")).unwrap(),
            json!("one")
        );
        assert_eq!(
            serde_json::to_value(TextInput::from(vec!["a", "b"])).unwrap(),
            json!(["a", "b"])
        );
        assert_eq!(
            serde_json::from_value::<TextInput>(json!(["x"])).unwrap(),
            TextInput::Many(vec!["x".to_string()])
        );
    }

    #[test]
    fn test_timestamps_convert_from_unix_seconds() {
        let file: FileObject = decode_value(file_object()).unwrap();

        let created = file.created().unwrap();

        assert_eq!(created.timestamp(), 1_613_779_121);
        assert_eq!(timestamp(0).unwrap().to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_list_response_iterates_data() {
        let list: ListResponse<FineTuneEvent> =
            decode_value(json!({"object": "list", "data": [fine_tune_event(), fine_tune_event()]}))
                .unwrap();

        assert_eq!(list.len(), 2);
        let levels: Vec<String> = list.into_iter().map(|event| event.level).collect();
        assert_eq!(levels, vec!["info", "info"]);
    }

    #[test]
    fn test_chat_first_content() {
        let response: ChatCompletionResponse = decode_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-3.5-turbo",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}}]
        }))
        .unwrap();

        assert_eq!(response.first_content(), Some("Hi"));
        assert_eq!(response.choices[0].message.role, ChatRole::Assistant);
    }
}

#[cfg(test)]
mod document_source_validation_tests {
    use super::*;

    fn client_that_must_not_send() -> OpenAIClient {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        OpenAIClient::with_transport(create_test_config(), Arc::new(transport)).unwrap()
    }

    #[tokio::test]
    async fn test_search_without_documents_or_file_is_rejected() {
        let client = client_that_must_not_send();

        let result = client
            .search(&EngineId::new("ada").unwrap(), &SearchCreate::new("query"))
            .await;

        assert!(matches!(result, Err(OpenAIError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn test_search_with_both_sources_is_rejected() {
        let client = client_that_must_not_send();
        let request = SearchCreate::new("query")
            .documents(vec!["a".to_string()])
            .file(FileId::new("file-1").unwrap());

        let result = client.search(&EngineId::new("ada").unwrap(), &request).await;

        assert!(matches!(result, Err(OpenAIError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn test_answers_without_documents_or_file_is_rejected() {
        let client = client_that_must_not_send();
        let request = AnswerCreate::new(
            ModelId::new("curie").unwrap(),
            "which puppy is happy?",
            vec![("q".to_string(), "a".to_string())],
            "context",
        );

        let result = client.create_answer(&request).await;

        assert!(matches!(result, Err(OpenAIError::InvalidRequest { .. })));
    }
}
