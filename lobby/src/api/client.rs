//! HTTP client for the Lobby backend.

use super::{errors::ApiError, messages, response::ApiResult};
use crate::config::ClientConfig;
use log::{debug, warn};
use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde_json::{Map, Value};

const USER_AGENT: &str = concat!("lobby/", env!("CARGO_PKG_VERSION"));

/// Placeholder body for requests that send none
pub(crate) const NO_BODY: Option<&()> = None;

/// Stateless API client.
///
/// Every call resolves to an [`ApiResult`]; transport failures, error
/// statuses and unexpected bodies are never returned as `Err`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

/// Status and decoded body of a received response
struct RawReply {
    status: StatusCode,
    body: Value,
}

impl RawReply {
    /// Split the reply into a usable body or the failure it represents.
    fn into_body(self, rejected_fallback: &str) -> Result<Value, ApiError> {
        let status = self.status.as_u16();

        if !self.status.is_success() {
            // Problem-details bodies explain themselves; otherwise use the status table.
            let message = text_field(&self.body, "detail")
                .or_else(|| text_field(&self.body, "title"))
                .unwrap_or_else(|| messages::status_message(status).to_string());
            return Err(ApiError::Status { status, message });
        }

        if self.body.get("success") == Some(&Value::Bool(false)) {
            let message = text_field(&self.body, "message")
                .unwrap_or_else(|| rejected_fallback.to_string());
            return Err(ApiError::Rejected { status, message });
        }

        Ok(self.body)
    }
}

/// Non-blank string field of a JSON object
pub(crate) fn text_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Decode a response body, treating empty or non-JSON bodies as `{}`.
fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}

impl ApiClient {
    /// Create a client for `base_url` (for example `http://localhost:8080/api/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// * `ApiError::Transport` - The HTTP client could not be built
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Perform a JSON request and normalize the outcome.
    ///
    /// The payload is the response body (`{}` when the body is empty or not
    /// JSON). A bearer token is attached when `token` is given.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        self.call(method, endpoint, body, token, messages::REQUEST_REJECTED, Ok)
            .await
    }

    /// Shared request pipeline: send, classify, then decode the body.
    ///
    /// `rejected_fallback` is the message used when a 2xx body says
    /// `success: false` without explaining why.
    pub(crate) async fn call<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
        rejected_fallback: &str,
        decode: impl FnOnce(Value) -> Result<T, ApiError>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
    {
        let reply = match self.exchange(method.clone(), endpoint, body, token).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!("{method} {endpoint} failed: {error}");
                return ApiResult::failure(&error);
            }
        };

        let status = reply.status.as_u16();
        let body = match reply.into_body(rejected_fallback) {
            Ok(body) => body,
            Err(error) => {
                debug!("{method} {endpoint} unsuccessful: {error}");
                return ApiResult::failure(&error);
            }
        };

        let message = text_field(&body, "message");
        match decode(body) {
            Ok(payload) => ApiResult::success(payload)
                .with_message(message)
                .with_status(status),
            Err(error) => {
                warn!("{method} {endpoint} returned an unusable body: {error}");
                ApiResult::failure(&error).with_status(status)
            }
        }
    }

    async fn exchange<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<RawReply, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        Ok(RawReply {
            status,
            body: parse_body(&bytes),
        })
    }
}
