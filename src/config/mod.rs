#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{PaperspaceError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.paperspace.io";
pub const API_KEY_ENV: &str = "PAPERSPACE_APIKEY";
pub const BASE_URL_ENV: &str = "PAPERSPACE_BASEURL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Overrides `<base_url>/graphql`.
    pub graphql_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub debug: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            graphql_url: None,
            timeout_seconds: None,
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).unwrap_or_default();
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_base_url);

        Self {
            api_key,
            base_url,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn graphql_endpoint(&self) -> String {
        match &self.graphql_url {
            Some(url) => url.clone(),
            None => format!("{}/graphql", self.base_url()),
        }
    }

    /// The API key, or `MissingConfig` when none is set.
    pub fn require_api_key(&self) -> Result<&str> {
        if self.api_key.trim().is_empty() {
            return Err(PaperspaceError::MissingConfig {
                field: API_KEY_ENV.to_string(),
            });
        }
        Ok(&self.api_key)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(graphql_url) = &self.graphql_url {
            validate_url("graphql_url", graphql_url)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if self.api_key.trim().is_empty() {
            tracing::warn!("No API key configured; set {} to authenticate", API_KEY_ENV);
        }
        Ok(())
    }
}
