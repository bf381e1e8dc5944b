//! Test helper utilities shared across unit test modules.

use crate::config::ClientConfig;
use crate::internals::retry::RetryPolicy;
use crate::transport::HttpResponse;
use std::time::Duration;

/// Retry policy with millisecond delays so retry tests stay fast.
pub fn create_fast_retry_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        total_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(1),
    }
}

pub fn create_test_config() -> ClientConfig {
    ClientConfig::new("test-key")
        .with_base_url("https://api.test.invalid")
        .with_retry_policy(create_fast_retry_policy(1))
}

pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        retry_after_seconds: None,
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn api_error_body(message: &str, error_type: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": null
        }
    })
}
