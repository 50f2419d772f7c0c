use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experiment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_deleted: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_finished: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_provisioning_finished: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_provisioning_started: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_started: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_teardown_finished: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_teardown_started: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_error: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub experiment_template_history_id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub experiment_template_id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub experiment_type_id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub handle: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub project_handle: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub project_id: i64,
    #[serde(deserialize_with = "super::null_as_default", rename = "started_by_user_id")]
    pub started_by_user_id: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub state: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub template_history: ExperimentTemplateHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentTemplateHistory {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: i64,
    pub dt_created: Option<DateTime<Utc>>,
    pub dt_deleted: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub experiment_template_id: i64,
    /// Shape varies by event source; see [`TriggerEvent`] for the common form.
    pub trigger_event: Option<serde_json::Value>,
    pub trigger_event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli_command: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub params: ExperimentParams,
}

impl ExperimentTemplateHistory {
    pub fn parsed_trigger_event(&self) -> Option<TriggerEvent> {
        self.trigger_event
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerEvent {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "super::null_as_default", rename = "type")]
    pub event_type: String,
    pub dt_created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub event_data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_directory: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub experiment_env: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_event_id: Option<i64>,

    #[serde(rename = "workspaceUrl", default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_preemptible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_metrics: Option<String>,

    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub datasets: Vec<ExperimentDataset>,

    #[serde(flatten)]
    pub single_node: SingleNodeExperimentParams,
    #[serde(flatten)]
    pub worker: MultiNodeExperimentWorkerParams,
    #[serde(flatten)]
    pub parameter_server: MultiNodeExperimentParameterServerParams,
    #[serde(flatten)]
    pub master: MultiNodeMpiExperimentMasterParams,
}

/// Container settings for single-node runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleNodeExperimentParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_dockerfile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiNodeExperimentWorkerParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_machine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_container_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_registry_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_registry_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_use_dockerfile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_dockerfile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiNodeExperimentParameterServerParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_machine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_container_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_registry_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_registry_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_use_dockerfile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_server_dockerfile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiNodeMpiExperimentMasterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_machine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_container_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_registry_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_registry_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_use_dockerfile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_dockerfile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentDataset {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_options: Option<ExperimentDatasetVolumeOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDatasetVolumeOptions {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// `POST /experiments/v2/run` wraps the experiment in `{data, message}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ExperimentEnvelope {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub data: Experiment,
}
