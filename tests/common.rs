//! Shared fixtures for the integration tests.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Not every test binary uses every helper
#![allow(dead_code)]

use openai_client::{ClientConfig, OpenAIClient, RetryPolicy};
use serde_json::{json, Value};
use std::time::Duration;

pub const TEST_API_KEY: &str = "sk-test-key";

/// Retry policy with millisecond delays so mock-server retries stay fast.
pub fn create_fast_retry_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        backoff_multiplier: 2.0,
        total_timeout: Duration::from_secs(10),
        request_timeout: Duration::from_secs(5),
    }
}

/// Configuration pointing at a mock server, single attempt.
pub fn create_test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(TEST_API_KEY)
        .with_base_url(base_url)
        .with_retry_policy(create_fast_retry_policy(1))
}

pub fn create_test_client(base_url: &str) -> OpenAIClient {
    OpenAIClient::new(create_test_config(base_url)).expect("test config is valid")
}

pub fn api_error(message: &str, error_type: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": null
        }
    })
}

pub fn usage_json() -> Value {
    json!({"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12})
}

pub fn file_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 140,
        "created_at": 1_613_779_121,
        "filename": "train.jsonl",
        "purpose": "fine-tune",
        "status": "uploaded"
    })
}

pub fn fine_tune_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "fine-tune",
        "model": "curie",
        "created_at": 1_614_807_352,
        "events": [{
            "object": "fine-tune-event",
            "created_at": 1_614_807_352,
            "level": "info",
            "message": "Job enqueued. Waiting for jobs ahead to complete. Queue number: 0."
        }],
        "fine_tuned_model": null,
        "hyperparams": {
            "batch_size": 4,
            "learning_rate_multiplier": 0.1,
            "n_epochs": 4,
            "prompt_loss_weight": 0.1
        },
        "organization_id": "org-1",
        "result_files": [],
        "status": status,
        "validation_files": [],
        "training_files": [file_json("file-abc")],
        "updated_at": 1_614_807_352
    })
}
