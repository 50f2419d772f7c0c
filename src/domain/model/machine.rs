use super::is_false;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MachineState {
    #[default]
    Off,
    Provisioning,
    Running,
    /// Any state this crate does not know by name (e.g. "starting", "restarting").
    Other(String),
}

impl MachineState {
    pub fn as_str(&self) -> &str {
        match self {
            MachineState::Off => "off",
            MachineState::Provisioning => "provisioning",
            MachineState::Running => "running",
            MachineState::Other(s) => s,
        }
    }
}

impl From<&str> for MachineState {
    fn from(s: &str) -> Self {
        match s {
            "off" => MachineState::Off,
            "provisioning" => MachineState::Provisioning,
            "running" => MachineState::Running,
            other => MachineState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MachineState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MachineState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MachineState::from(s.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Machine {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub os: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub ram: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub cpus: u32,
    #[serde(deserialize_with = "super::null_as_default")]
    pub gpu: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub state: MachineState,
    #[serde(deserialize_with = "super::null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub storage_total: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub storage_used: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub usage_rate: f64,
    pub shutdown_timeout_in_hours: Option<u32>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub shutdown_timeout_forces: bool,
    pub auto_snapshot_frequency: Option<u32>,
    pub auto_snapshot_save_count: Option<u32>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub agent_type: String,
    pub network_id: Option<String>,
    pub private_ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    pub dt_created: Option<DateTime<Utc>>,
    pub dt_deleted: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub team_id: String,
    pub script_id: Option<String>,
    pub dt_last_run: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_managed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineCreateParams {
    pub name: String,
    pub region: String,
    pub machine_type: String,
    pub size: u32,
    pub billing_type: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_timeout_in_hours: Option<u32>,
    #[serde(rename = "assignPublicIP", skip_serializing_if = "is_false")]
    pub assign_public_ip: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_managed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MachineListParams {
    pub filter: HashMap<String, String>,
}

impl MachineListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineUpdateParams {
    #[serde(rename = "machineId")]
    pub id: String,
    #[serde(rename = "machineName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_timeout_in_hours: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub shutdown_timeout_forces: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_snapshot_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_snapshot_save_count: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub perform_auto_snapshot: bool,
    #[serde(rename = "dynamicPublicIp", skip_serializing_if = "is_false")]
    pub dynamic_public_ip: bool,
}
