use crate::config::ClientConfig;
use crate::utils::error::{PaperspaceError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

/// Minimal GraphQL-over-HTTP client: one POST per document, bearer auth.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
    debug: bool,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            timeout: None,
            debug: false,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::new(config.graphql_endpoint(), config.api_key.clone());
        client.timeout = config.timeout();
        client.debug = config.debug;
        client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Runs a query or mutation and decodes `data` into `T`.
    /// `operation` names the call in error messages.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), serde_json::Value::String(query.to_string()));
        if let Some(variables) = variables {
            body.insert("variables".to_string(), variables);
        }
        let body = serde_json::Value::Object(body);

        if self.debug {
            tracing::debug!("GraphQL {} request: {}", operation, body);
        }

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| PaperspaceError::GraphQL {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status();
        let text = response.text().await?;

        if self.debug {
            tracing::debug!("GraphQL {} response ({}): {}", operation, status, text);
        }

        if !status.is_success() {
            return Err(PaperspaceError::GraphQL {
                operation: operation.to_string(),
                message: format!("non-200 OK status code: {} body: {:?}", status, text),
            });
        }

        let parsed: GraphqlResponse = serde_json::from_str(&text)?;
        if !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PaperspaceError::GraphQL {
                operation: operation.to_string(),
                message,
            });
        }

        let data = parsed.data.ok_or_else(|| PaperspaceError::GraphQL {
            operation: operation.to_string(),
            message: "response contained no data".to_string(),
        })?;

        Ok(serde_json::from_value(data)?)
    }
}

/// Wraps a value as `{"input": value}`, the variable shape every document here uses.
pub fn input_vars<T: serde::Serialize>(input: T) -> Result<serde_json::Value> {
    Ok(serde_json::json!({ "input": serde_json::to_value(input)? }))
}
