use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperspaceError {
    #[error("{0}")]
    Api(ApiError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{operation}: request failed: {message}")]
    GraphQL { operation: String, message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Ambiguous { message: String },

    #[error("no region found for {region}")]
    UnknownRegion { region: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl PaperspaceError {
    /// HTTP status reported by the API, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            PaperspaceError::Api(e) => Some(e.status),
            PaperspaceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PaperspaceError::NotFound { .. }) || self.status() == Some(404)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PaperspaceError::Api(e) if e.status == 401 || e.status == 403 => {
                format!("Authentication failed ({}). Check PAPERSPACE_APIKEY.", e)
            }
            PaperspaceError::Api(e) => format!("API error: {}", e),
            PaperspaceError::Http(_) => {
                "Could not reach the API. Check your network and base URL.".to_string()
            }
            PaperspaceError::MissingConfig { field } => {
                format!("Missing configuration value '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for PaperspaceError {
    fn from(e: ApiError) -> Self {
        PaperspaceError::Api(e)
    }
}

pub type Result<T> = std::result::Result<T, PaperspaceError>;

/// Error body returned by the REST API: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub name: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Decodes an error body. Anything that is not an error envelope is
    /// reported as a plain `HTTPError` carrying the body text.
    pub fn from_body(status: u16, body: &str) -> Self {
        if let Ok(ApiErrorResponse { error: Some(mut e) }) = serde_json::from_str(body) {
            if e.status == 0 {
                e.status = status;
            }
            return e;
        }

        let message = if body.trim().is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };

        ApiError {
            name: "HTTPError".to_string(),
            message,
            status,
            details: None,
        }
    }
}

fn detail_message(details: &serde_json::Value) -> Option<&str> {
    match details {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map.get("message").and_then(|m| m.as_str()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawError {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            message: Option<String>,
            #[serde(default)]
            status: Option<u16>,
            // experiments API
            #[serde(default)]
            code: Option<u16>,
            #[serde(default)]
            details: Option<serde_json::Value>,
        }

        let raw = RawError::deserialize(deserializer)?;
        let details = raw.details.filter(|d| !d.is_null());
        let message = raw.message.unwrap_or_default();

        let message = if message.is_empty() {
            details
                .as_ref()
                .and_then(detail_message)
                .unwrap_or_default()
                .to_string()
        } else {
            message
        };

        Ok(ApiError {
            name: raw.name.unwrap_or_default(),
            message,
            status: raw.code.or(raw.status).unwrap_or_default(),
            details,
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.details.as_ref().and_then(detail_message) {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}
