//! HTTP transport seam.
//!
//! [`Transport`] is the only place network I/O happens. The client builds an
//! [`HttpRequest`], hands it over, and interprets the raw [`HttpResponse`]
//! itself, so status handling and decoding stay identical across transports.
//! [`ReqwestTransport`] is the production implementation.

use crate::error::{OpenAIError, OpenAIResult};
use crate::logging::log_error;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER};
use reqwest::multipart::{Form, Part};

/// Header carrying the optional organization id.
pub const ORGANIZATION_HEADER: &str = "openai-organization";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A file part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A `multipart/form-data` body: text fields plus one file.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub text_fields: Vec<(String, String)>,
    pub file: FilePart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartBody),
}

/// One fully-resolved API call.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub api_key: String,
    pub organization: Option<String>,
    pub body: RequestBody,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("body", &self.body)
            .finish()
    }
}

/// Raw response as received from the network.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed `Retry-After` header in whole seconds
    pub retry_after_seconds: Option<u64>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request. Implementations must not retry; the client owns that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> OpenAIResult<HttpResponse>;
}

/// [`Transport`] over a shared `reqwest::Client`.
///
/// The inner client owns connection pooling and keep-alive; cloning it is cheap
/// and shares the pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-configured client (proxies, TLS roots, pool limits).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build_headers(request: &HttpRequest) -> OpenAIResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", request.api_key)).map_err(|e| {
                OpenAIError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        if let Some(organization) = &request.organization {
            headers.insert(
                ORGANIZATION_HEADER,
                HeaderValue::from_str(organization).map_err(|e| {
                    OpenAIError::configuration_error(format!("Invalid organization header: {e}"))
                })?,
            );
        }
        Ok(headers)
    }

    fn build_form(body: &MultipartBody) -> Form {
        let file = Part::bytes(body.file.bytes.clone()).file_name(body.file.file_name.clone());
        body.text_fields
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
            .part(body.file.field_name.clone(), file)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> OpenAIResult<HttpResponse> {
        let headers = Self::build_headers(&request)?;
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        }
        .headers(headers);

        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(body) => builder.multipart(Self::build_form(body)),
        };

        let response = builder.send().await.map_err(|e| {
            log_error!(
                method = request.method.as_str(),
                url = %request.url,
                error = %e,
                "HTTP request failed"
            );
            OpenAIError::request_failed(format!("Request failed: {e}"), Some(Box::new(e)))
        })?;

        let status = response.status().as_u16();
        let retry_after_seconds = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let body = response.bytes().await.map_err(|e| {
            log_error!(error = %e, "Failed to read response body");
            OpenAIError::request_failed(format!("Failed to read response: {e}"), Some(Box::new(e)))
        })?;

        Ok(HttpResponse {
            status,
            retry_after_seconds,
            body: body.to_vec(),
        })
    }
}
