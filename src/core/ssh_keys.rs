use crate::core::client::Client;
use crate::core::graphql::input_vars;
use crate::domain::model::ssh_key::{
    payload_node, CreateSshKeyData, DeleteSshKeyData, SshKeyData, SshKeysData,
};
use crate::domain::model::{CreateSshKeyInput, DeleteSshKeyInput, SshKey};
use crate::utils::error::{PaperspaceError, Result};
use crate::utils::validation::validate_non_empty_string;

pub(crate) const CREATE_SSH_KEY_MUTATION: &str = "mutation($input:CreateSSHKeyInput!){createSSHKey(input: $input){sshKey{id,name,publicKey,dtCreated,dtModified,dtDeleted}}}";
pub(crate) const DELETE_SSH_KEY_MUTATION: &str = "mutation($input:DeleteSSHKeyInput!){deleteSSHKey(input: $input){sshKey{id,name,publicKey,dtCreated,dtModified,dtDeleted}}}";
pub(crate) const SSH_KEY_QUERY: &str =
    "query($input:String!){sshKey(name: $input){id,name,publicKey,dtCreated,dtModified,dtDeleted}}";
// Single page; the API caps connections at 100 nodes.
pub(crate) const SSH_KEYS_QUERY: &str =
    "{sshKeys(first: 100){nodes{id,name,publicKey,dtCreated,dtModified,dtDeleted}}}";

fn or_fallback(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl Client {
    /// Registers a public key. An empty name or key is rejected before any request is sent.
    pub async fn create_ssh_key(&self, input: CreateSshKeyInput) -> Result<SshKey> {
        validate_non_empty_string("name", &input.name)?;
        validate_non_empty_string("public_key", &input.public_key)?;

        let data: CreateSshKeyData = self
            .graphql
            .execute("createSSHKey", CREATE_SSH_KEY_MUTATION, Some(input_vars(&input)?))
            .await?;

        let mut key = payload_node(data.create_ssh_key).into_ssh_key();
        key.name = or_fallback(key.name, &input.name);
        key.public_key = or_fallback(key.public_key, &input.public_key);
        Ok(key)
    }

    pub async fn delete_ssh_key(&self, input: DeleteSshKeyInput) -> Result<SshKey> {
        let data: DeleteSshKeyData = self
            .graphql
            .execute("deleteSSHKey", DELETE_SSH_KEY_MUTATION, Some(input_vars(&input)?))
            .await?;

        let mut key = payload_node(data.delete_ssh_key).into_ssh_key();
        key.id = or_fallback(key.id, &input.id);
        Ok(key)
    }

    /// Fetches a key by its name. A `null` key in the response is reported as `NotFound`.
    pub async fn get_ssh_key(&self, name: &str) -> Result<SshKey> {
        let data: SshKeyData = self
            .graphql
            .execute("sshKey", SSH_KEY_QUERY, Some(input_vars(name)?))
            .await?;

        let node = data.ssh_key.ok_or_else(|| PaperspaceError::NotFound {
            message: format!("no SSH key found with name {}", name),
        })?;
        let mut key = node.into_ssh_key();
        key.name = or_fallback(key.name, name);
        Ok(key)
    }

    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let data: SshKeysData = self
            .graphql
            .execute("sshKeys", SSH_KEYS_QUERY, None)
            .await?;

        Ok(data
            .ssh_keys
            .nodes
            .into_iter()
            .map(|node| node.into_ssh_key())
            .collect())
    }
}
