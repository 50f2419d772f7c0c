use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP verbs used by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Whether params travel in the query string rather than the body.
    pub fn uses_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options. Never part of the request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl RequestParams {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw result of a transport call; decoding happens in the client.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Transport seam for REST calls. Swap it to run the client against fixtures.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<serde_json::Value>,
        request_params: &RequestParams,
    ) -> Result<BackendResponse>;
}
