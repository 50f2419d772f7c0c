pub mod cluster;
pub mod experiment;
pub mod machine;
pub mod ml_model;
pub mod network;
pub mod ssh_key;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub use cluster::*;
pub use experiment::*;
pub use machine::*;
pub use ml_model::*;
pub use network::*;
pub use ssh_key::*;

/// Free-form list filter, sent as `filter` on list endpoints.
pub type Filter = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiToken {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Credential {
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRegistry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Reads an explicit JSON `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
