use crate::codec::{self, WireRecord};
use crate::config::ClientConfig;
use crate::error::{ApiErrorEnvelope, OpenAIError, OpenAIResult};
use crate::internals::retry::RetryExecutor;
use crate::logging::{log_debug, log_warn};
use crate::transport::{
    HttpMethod, HttpRequest, HttpResponse, MultipartBody, ReqwestTransport, RequestBody, Transport,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Longest slice of an unparseable error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the REST API.
///
/// Each resource module adds its calls as methods on this type. A call is one
/// round trip (more only if the retry policy allows it); no state is shared
/// between calls apart from the read-only configuration and transport, so a
/// single client can be cloned or shared across tasks freely.
///
/// ```rust,no_run
/// use openai_client::{ClientConfig, CompletionCreate, ModelId, OpenAIClient};
///
/// # async fn example() -> openai_client::OpenAIResult<()> {
/// let client = OpenAIClient::new(ClientConfig::new("sk-...").with_max_retries(2))?;
/// let request = CompletionCreate::new(ModelId::new("text-davinci-003")?)
///     .prompt("Say hello")
///     .max_tokens(16);
/// let completion = client.create_completion(&request).await?;
/// println!("{}", completion.choices[0].text);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OpenAIClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    retry: RetryExecutor,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Create a client backed by a fresh `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAIError::ConfigurationError`] if the configuration fails validation.
    pub fn new(config: ClientConfig) -> OpenAIResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client that shares a caller-owned `reqwest::Client` and its pool.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> OpenAIResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::with_client(http)))
    }

    /// Create a client over any [`Transport`].
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> OpenAIResult<Self> {
        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            has_organization = config.organization.is_some(),
            max_attempts = config.retry_policy.max_attempts,
            "OpenAIClient created"
        );

        Ok(Self {
            retry: RetryExecutor::new(config.retry_policy.clone()),
            config,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Request helpers used by the resource modules
    // =========================================================================

    pub(crate) async fn get<T>(&self, path: &str) -> OpenAIResult<T>
    where
        T: WireRecord + DeserializeOwned,
    {
        self.execute(HttpMethod::Get, path, RequestBody::Empty).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> OpenAIResult<Vec<u8>> {
        self.execute_raw(HttpMethod::Get, path, RequestBody::Empty)
            .await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> OpenAIResult<T>
    where
        B: WireRecord + Serialize,
        T: WireRecord + DeserializeOwned,
    {
        let body = RequestBody::Json(codec::encode(body)?);
        self.execute(HttpMethod::Post, path, body).await
    }

    pub(crate) async fn post_empty<T>(&self, path: &str) -> OpenAIResult<T>
    where
        T: WireRecord + DeserializeOwned,
    {
        self.execute(HttpMethod::Post, path, RequestBody::Empty)
            .await
    }

    pub(crate) async fn post_multipart<T>(&self, path: &str, body: MultipartBody) -> OpenAIResult<T>
    where
        T: WireRecord + DeserializeOwned,
    {
        self.execute(HttpMethod::Post, path, RequestBody::Multipart(body))
            .await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> OpenAIResult<T>
    where
        T: WireRecord + DeserializeOwned,
    {
        self.execute(HttpMethod::Delete, path, RequestBody::Empty)
            .await
    }

    async fn execute<T>(&self, method: HttpMethod, path: &str, body: RequestBody) -> OpenAIResult<T>
    where
        T: WireRecord + DeserializeOwned,
    {
        let bytes = self.execute_raw(method, path, body).await?;
        codec::decode(&bytes)
    }

    /// Send with retries and return the body of a successful response.
    async fn execute_raw(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
    ) -> OpenAIResult<Vec<u8>> {
        let request = HttpRequest {
            method,
            url: self.config.endpoint(path),
            api_key: self.config.api_key.clone(),
            organization: self.config.organization.clone(),
            body,
        };

        log_debug!(
            method = method.as_str(),
            path = %path,
            "Sending API request"
        );

        self.retry.execute(|| self.send_once(&request)).await
    }

    /// A single attempt: one transport round trip.
    async fn send_once(&self, request: &HttpRequest) -> OpenAIResult<Vec<u8>> {
        let response = self.transport.send(request.clone()).await?;
        interpret_response(response)
    }
}

/// Split a raw response into a success body or a structured error.
pub(crate) fn interpret_response(response: HttpResponse) -> OpenAIResult<Vec<u8>> {
    if response.is_success() {
        return Ok(response.body);
    }

    match codec::decode::<ApiErrorEnvelope>(&response.body) {
        Ok(envelope) => Err(OpenAIError::api(
            response.status,
            envelope.error,
            response.retry_after_seconds,
        )),
        Err(_) => {
            log_warn!(
                status = response.status,
                body_len = response.body.len(),
                "Error response did not carry an error object"
            );
            let body: String = String::from_utf8_lossy(&response.body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            Err(OpenAIError::unexpected_status(response.status, body))
        }
    }
}
