use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An SSH key registered with the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    pub id: String,
    pub name: String,
    pub public_key: String,
    pub dt_created: Option<DateTime<Utc>>,
    pub dt_modified: Option<DateTime<Utc>>,
    pub dt_deleted: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSshKeyInput {
    pub name: String,
    pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteSshKeyInput {
    pub id: String,
}

/// Selection set shared by every SSH key document.
pub(crate) const SSH_KEY_FIELDS: &str = "id,name,publicKey,dtCreated,dtModified,dtDeleted";

/// `sshKey` node as the GraphQL API returns it. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SshKeyNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub public_key: Option<String>,
    #[serde(deserialize_with = "lenient_rfc3339")]
    pub dt_created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_rfc3339")]
    pub dt_modified: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_rfc3339")]
    pub dt_deleted: Option<DateTime<Utc>>,
}

impl SshKeyNode {
    pub fn into_ssh_key(self) -> SshKey {
        SshKey {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            public_key: self.public_key.unwrap_or_default(),
            dt_created: self.dt_created,
            dt_modified: self.dt_modified,
            dt_deleted: self.dt_deleted,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SshKeyPayload {
    #[serde(rename = "sshKey", default)]
    pub ssh_key: Option<SshKeyNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateSshKeyData {
    #[serde(rename = "createSSHKey", default)]
    pub create_ssh_key: Option<SshKeyPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteSshKeyData {
    #[serde(rename = "deleteSSHKey", default)]
    pub delete_ssh_key: Option<SshKeyPayload>,
}

/// Returned node of a mutation payload, or an empty node when the API sent none.
pub(crate) fn payload_node(payload: Option<SshKeyPayload>) -> SshKeyNode {
    payload.and_then(|p| p.ssh_key).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKeyData {
    #[serde(rename = "sshKey", default)]
    pub ssh_key: Option<SshKeyNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SshKeyConnection {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub nodes: Vec<SshKeyNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKeysData {
    #[serde(rename = "sshKeys", default, deserialize_with = "super::null_as_default")]
    pub ssh_keys: SshKeyConnection,
}

/// Accepts RFC 3339 strings. Null, missing, malformed, or non-string values become `None`.
fn lenient_rfc3339<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => parse_timestamp(&s),
        Some(other) => {
            tracing::warn!("Ignoring non-string timestamp {}", other);
            None
        }
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Ignoring malformed timestamp {:?}: {}", raw, e);
            None
        }
    }
}
