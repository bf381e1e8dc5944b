use crate::error::{OpenAIError, OpenAIResult};
use crate::internals::retry::RetryPolicy;
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};

/// Base URL of the public API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client configuration
///
/// Holds the only state a client needs besides its transport: the secret key,
/// where to send requests, and how many attempts the transport may make.
/// The key is never serialized and is redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(skip_serializing, default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `OpenAI-Organization` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            organization: None,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the public API with the given key and default policy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Allow up to `max_retries` attempts after the first one.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry_policy.max_attempts = max_retries.saturating_add(1);
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Validate client configuration
    ///
    /// # Errors
    ///
    /// Returns [`OpenAIError::ConfigurationError`] if:
    /// - The API key is empty
    /// - The base URL is empty or not http(s)
    /// - The retry policy allows zero attempts
    /// - The backoff multiplier is not a finite number of at least 1.0
    /// - The maximum backoff delay exceeds the total timeout
    pub fn validate(&self) -> OpenAIResult<()> {
        log_debug!(
            has_api_key = !self.api_key.is_empty(),
            base_url = %self.base_url,
            has_organization = self.organization.is_some(),
            max_attempts = self.retry_policy.max_attempts,
            "Validating client configuration"
        );

        if self.api_key.trim().is_empty() {
            return Err(OpenAIError::configuration_error("API key is required"));
        }
        if self.base_url.is_empty() {
            return Err(OpenAIError::configuration_error("Base URL is required"));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(OpenAIError::configuration_error(format!(
                "Base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.retry_policy.max_attempts == 0 {
            return Err(OpenAIError::configuration_error(
                "Retry policy must allow at least one attempt",
            ));
        }
        let multiplier = self.retry_policy.backoff_multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(OpenAIError::configuration_error(format!(
                "Backoff multiplier must be a finite number of at least 1.0, got {multiplier}"
            )));
        }
        if self.retry_policy.max_delay > self.retry_policy.total_timeout {
            return Err(OpenAIError::configuration_error(format!(
                "Maximum retry delay {:?} exceeds the total timeout {:?}",
                self.retry_policy.max_delay, self.retry_policy.total_timeout
            )));
        }
        Ok(())
    }

    /// Join an API path such as `/v1/models` onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
