use crate::config::{ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::utils::error::{PaperspaceError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk client settings.
///
/// ```toml
/// [api]
/// api_key = "..."
/// base_url = "https://api.paperspace.io"
/// timeout_seconds = 30
///
/// [logging]
/// debug = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub graphql_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub debug: Option<bool>,
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| PaperspaceError::Config {
            message: format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Resolves the file against the environment: values in the file win,
    /// missing ones fall back to the environment, then to defaults.
    pub fn into_client_config(self) -> ClientConfig {
        self.resolve(|key| std::env::var(key).ok())
    }

    pub fn resolve<F>(self, lookup: F) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api
            .api_key
            .or_else(|| lookup(API_KEY_ENV))
            .unwrap_or_default();
        let base_url = self
            .api
            .base_url
            .or_else(|| lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        ClientConfig {
            api_key,
            base_url,
            graphql_url: self.api.graphql_url,
            timeout_seconds: self.api.timeout_seconds,
            debug: self.logging.and_then(|l| l.debug).unwrap_or(false),
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = TomlConfig::from_file(path)?.into_client_config();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_file() {
        let config = TomlConfig::from_str(
            r#"
[api]
api_key = "file-key"
base_url = "https://staging.example.com"
timeout_seconds = 15

[logging]
debug = true
"#,
        )
        .unwrap()
        .resolve(|_| None);

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.timeout_seconds, Some(15));
        assert!(config.debug);
    }

    #[test]
    fn test_missing_values_fall_back_to_lookup() {
        let config = TomlConfig::from_str("[api]\n")
            .unwrap()
            .resolve(|key| match key {
                API_KEY_ENV => Some("env-key".to_string()),
                _ => None,
            });

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.debug);
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_str("[api\nbase_url = ");
        assert!(matches!(result, Err(PaperspaceError::TomlParse(_))));
    }

    #[test]
    fn test_from_file_validates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"ftp://example.com\"").unwrap();

        let result = ClientConfig::from_file(file.path());
        assert!(matches!(
            result,
            Err(PaperspaceError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = TomlConfig::from_file("/nonexistent/paperspace.toml");
        assert!(matches!(result, Err(PaperspaceError::Config { .. })));
    }
}
