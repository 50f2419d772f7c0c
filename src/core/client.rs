use crate::config::ClientConfig;
use crate::core::api_backend::ApiBackend;
use crate::core::graphql::GraphqlClient;
use crate::domain::ports::{Backend, BackendResponse, Method, RequestParams};
use crate::utils::error::{ApiError, PaperspaceError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Entry point for both the REST and GraphQL APIs.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    backend: Arc<dyn Backend>,
    pub(crate) graphql: GraphqlClient,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("graphql_endpoint", &self.graphql.endpoint())
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Client configured from `PAPERSPACE_APIKEY` and `PAPERSPACE_BASEURL`.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let backend = ApiBackend::from_config(&config);
        Self::from_config_with_backend(config, backend)
    }

    /// Environment-configured client whose REST calls go through `backend`.
    pub fn with_backend<B: Backend + 'static>(backend: B) -> Self {
        Self::from_config_with_backend(ClientConfig::from_env(), backend)
    }

    pub fn from_config_with_backend<B: Backend + 'static>(config: ClientConfig, backend: B) -> Self {
        Self {
            graphql: GraphqlClient::from_config(&config),
            api_key: config.api_key,
            backend: Arc::new(backend),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Logs GraphQL request and response bodies at debug level.
    pub fn debug(&mut self) {
        self.graphql.set_debug(true);
    }

    /// Sends one REST call through the backend and decodes the body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Option<serde_json::Value>,
        request_params: &RequestParams,
    ) -> Result<T> {
        let response = self.send(method, path, params, request_params).await?;
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }

    /// Like [`Client::request`] but ignores whatever body comes back.
    pub async fn request_no_content(
        &self,
        method: Method,
        path: &str,
        params: Option<serde_json::Value>,
        request_params: &RequestParams,
    ) -> Result<()> {
        self.send(method, path, params, request_params).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<serde_json::Value>,
        request_params: &RequestParams,
    ) -> Result<BackendResponse> {
        let mut request_params = request_params.clone();
        request_params
            .headers
            .insert(API_KEY_HEADER.to_string(), self.api_key.clone());

        let response = self
            .backend
            .request(method, path, params, &request_params)
            .await?;

        if response.is_error() {
            let error = ApiError::from_body(response.status, &response.body);
            tracing::debug!("{} {} failed: {} ({})", method, path, error, error.status);
            return Err(PaperspaceError::Api(error));
        }

        Ok(response)
    }
}

pub(crate) fn to_params<P: Serialize>(params: &P) -> Result<Option<serde_json::Value>> {
    Ok(Some(serde_json::to_value(params)?))
}

/// Form-encodes a value for use in a query string.
pub(crate) fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
