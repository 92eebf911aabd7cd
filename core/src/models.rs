use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Production Matrix API used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://matrix.loot42.com";

/// Header carrying the Matrix API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP methods used by the operation catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request against the Matrix API.
///
/// `path` already contains the query string, if any, and is appended to the
/// configured base URL verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(method: HttpMethod, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A scalar argument that is forwarded into a URL without numeric validation.
///
/// Identifiers and timestamps are declared as numbers in the tool schemas, but
/// callers may send strings; both are accepted and rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Number(serde_json::Number),
    Text(String),
}

impl ArgValue {
    /// Whether the value counts as "present" for optional query parameters:
    /// zero and the empty string are treated as absent.
    pub fn is_set(&self) -> bool {
        match self {
            ArgValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            ArgValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(s) => f.write_str(s),
            ArgValue::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    return write!(f, "{n}");
                }
                match n.as_f64() {
                    // 7.0 is rendered as 7, the way the task ids appear in paths
                    Some(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
                        write!(f, "{}", v as i64)
                    }
                    _ => write!(f, "{n}"),
                }
            }
        }
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(value.into())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

/// Connection settings for the upstream Matrix API.
///
/// Constructed once at startup and handed to the HTTP client; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    base_url: String,
    api_key: String,
}

impl UpstreamSettings {
    /// Create settings, trimming any trailing `/` from the base URL so that
    /// catalog paths (which start with `/`) can be appended directly.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Full URL for a catalog path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
