//! HTTP client for the upstream Matrix API.
//!
//! One [`MatrixClient`] is built at startup from [`UpstreamSettings`] and
//! shared by every invocation. It holds no mutable state, so concurrent calls
//! need no coordination.

use ::matrix_core::{
    ApiRequest, HttpMethod, MatrixError, Result, UpstreamSettings, API_KEY_HEADER,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

/// Seam between dispatch and the network.
///
/// Each call issues exactly one request and resolves to the parsed JSON body
/// on success.
#[async_trait]
pub trait MatrixApi: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value>;
}

/// Per-call overrides for [`MatrixClient::api_fetch`]
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Defaults to GET
    pub method: Option<HttpMethod>,
    pub body: Option<Value>,
    /// Replace shared headers of the same (case-insensitive) name
    pub headers: Vec<(String, String)>,
}

impl From<ApiRequest> for FetchOptions {
    fn from(request: ApiRequest) -> Self {
        Self {
            method: Some(request.method),
            body: request.body,
            headers: Vec::new(),
        }
    }
}

/// reqwest-backed Matrix API client
#[derive(Clone)]
pub struct MatrixClient {
    http: reqwest::Client,
    settings: UpstreamSettings,
    headers: HeaderMap,
}

impl MatrixClient {
    /// Build the client and its shared header set.
    ///
    /// Fails if the API key cannot be used as a header value.
    pub fn new(settings: UpstreamSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("matrix-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MatrixError::Configuration(format!("HTTP client: {e}")))?;

        Self::with_http_client(http, settings)
    }

    /// Build on top of an existing reqwest client
    pub fn with_http_client(http: reqwest::Client, settings: UpstreamSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut api_key = HeaderValue::from_str(settings.api_key()).map_err(|_| {
            MatrixError::Configuration(
                "MATRIX_API_KEY contains characters not allowed in a header".to_string(),
            )
        })?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        Ok(Self {
            http,
            settings,
            headers,
        })
    }

    pub fn settings(&self) -> &UpstreamSettings {
        &self.settings
    }

    /// Issue one request to `base_url + path` and parse the JSON body.
    ///
    /// The body is parsed regardless of status. A non-2xx status becomes
    /// [`MatrixError::Upstream`] carrying the re-serialized body (or the raw
    /// text when it is not JSON).
    pub async fn api_fetch(&self, path: &str, options: FetchOptions) -> Result<Value> {
        let url = self.settings.url_for(path);
        let method = options.method.unwrap_or(HttpMethod::Get);
        let headers = self.merge_headers(&options.headers)?;

        debug!(method = %method, url = %url, "Sending Matrix API request");

        let mut request = self
            .http
            .request(to_reqwest_method(method), &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MatrixError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MatrixError::Transport(e.to_string()))?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            bytes = text.len(),
            "Matrix API responded"
        );

        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            let body = match parsed {
                Ok(value) => value.to_string(),
                Err(_) => text,
            };
            return Err(MatrixError::upstream(status.as_u16(), body));
        }

        parsed.map_err(|e| MatrixError::InvalidResponse(e.to_string()))
    }

    fn merge_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = self.headers.clone();
        for (name, value) in overrides {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| MatrixError::Transport(format!("invalid header name {name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| MatrixError::Transport(format!("invalid value for header {name}: {e}")))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl MatrixApi for MatrixClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let path = request.path.clone();
        self.api_fetch(&path, FetchOptions::from(request)).await
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}
