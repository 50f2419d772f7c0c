use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Region display names accepted by the networks API, with their numeric ids.
pub const REGION_MAP: &[(&str, u32)] = &[
    ("East Coast (NY2)", 1),
    ("West Coast (CA1)", 2),
    ("Europe (AMS1)", 3),
];

pub fn region_id(region: &str) -> Option<u32> {
    REGION_MAP
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, id)| *id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Network {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub netmask: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub team_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_managed: bool,
    pub dt_created: Option<DateTime<Utc>>,
    pub dt_deleted: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkCreateParams {
    pub name: String,
    /// Display name from [`REGION_MAP`].
    pub region: String,
}

/// Body actually sent on create; the API wants the numeric region id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkCreateBody {
    pub name: String,
    pub region_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkGetParams {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkDeleteParams {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}
