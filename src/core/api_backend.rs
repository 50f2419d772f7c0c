use crate::config::ClientConfig;
use crate::domain::ports::{Backend, BackendResponse, Method, RequestParams};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("paperspace-client/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport for the REST API.
#[derive(Debug, Clone)]
pub struct ApiBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
    log_bodies: bool,
}

impl ApiBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: None,
            log_bodies: false,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut backend = Self::new(config.base_url());
        backend.timeout = config.timeout();
        backend.log_bodies = config.debug;
        backend
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Flattens a params object into query pairs. Strings go through as-is,
/// nested values are JSON-encoded, nulls are dropped.
pub fn query_pairs(params: &serde_json::Value) -> Vec<(String, String)> {
    let serde_json::Value::Object(map) = params else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let encoded = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), encoded))
        })
        .collect()
}

#[async_trait]
impl Backend for ApiBackend {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<serde_json::Value>,
        request_params: &RequestParams,
    ) -> Result<BackendResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(to_reqwest_method(method), &url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, DEFAULT_USER_AGENT);

        for (key, value) in &request_params.headers {
            request = request.header(key, value);
        }

        if let Some(params) = params {
            if self.log_bodies {
                tracing::debug!("Request params: {}", params);
            }
            if method.uses_query() {
                request = request.query(&query_pairs(&params));
            } else {
                request = request.json(&params);
            }
        }

        if let Some(timeout) = request_params.timeout.or(self.timeout) {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("{} {} -> {}", method, url, status);
        if self.log_bodies {
            tracing::debug!("Response body: {}", body);
        }

        Ok(BackendResponse { status, body })
    }
}
