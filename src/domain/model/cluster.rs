use super::{is_false, null_as_default, ApiToken, ContainerRegistry, Filter, S3Credential};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CLUSTER_TYPE: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClusterPlatformType {
    Aws,
    Azure,
    Gcp,
    Dgx,
    Metal,
    Paperspace,
    /// A `cloud` value reported by the API that is not in [`CLUSTER_PLATFORMS`].
    Other(String),
}

pub const CLUSTER_PLATFORMS: &[ClusterPlatformType] = &[
    ClusterPlatformType::Aws,
    ClusterPlatformType::Azure,
    ClusterPlatformType::Dgx,
    ClusterPlatformType::Gcp,
    ClusterPlatformType::Metal,
    ClusterPlatformType::Paperspace,
];

pub const CLUSTER_AWS_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-2",
    "ca-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-central-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
];

pub const CLUSTER_AZURE_REGIONS: &[&str] = &[
    "australiacentral",
    "australiaeast",
    "australiasoutheast",
    "brazilsouth",
    "brazilsoutheast",
    "canadacentral",
    "canadaeast",
    "centralindia",
    "centralus",
    "eastasia",
    "eastus",
    "eastus2",
    "francecentral",
    "francesouth",
    "germanynorth",
    "germanywestcentral",
    "japaneast",
    "japanwest",
    "koreacentral",
    "koreasouth",
    "northcentralus",
    "northeurope",
    "norwayeast",
    "norwaywest",
    "southafricanorth",
    "southcentralus",
    "southindia",
    "southeastasia",
    "switzerlandnorth",
    "switzerlandwest",
    "uaecentral",
    "uaenorth",
    "uksouth",
    "ukwest",
    "westcentralus",
    "westeurope",
    "westus",
    "westus2",
];

pub const CLUSTER_GCP_REGIONS: &[&str] = &[
    "asia-east1",
    "europe-west1",
    "europe-west4",
    "us-central1",
    "us-east1",
    "us-west1",
];

impl ClusterPlatformType {
    pub fn as_str(&self) -> &str {
        match self {
            ClusterPlatformType::Aws => "aws",
            ClusterPlatformType::Azure => "azure",
            ClusterPlatformType::Gcp => "gcp",
            ClusterPlatformType::Dgx => "nvidia-dgx",
            ClusterPlatformType::Metal => "metal",
            ClusterPlatformType::Paperspace => "paperspace-cloud",
            ClusterPlatformType::Other(s) => s,
        }
    }

    /// Regions a cluster can be placed in. Empty for platforms without a fixed list.
    pub fn regions(&self) -> &'static [&'static str] {
        match self {
            ClusterPlatformType::Aws => CLUSTER_AWS_REGIONS,
            ClusterPlatformType::Azure => CLUSTER_AZURE_REGIONS,
            ClusterPlatformType::Gcp => CLUSTER_GCP_REGIONS,
            _ => &[],
        }
    }
}

impl fmt::Display for ClusterPlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the known platforms parse; use deserialization to accept anything the API sends.
impl FromStr for ClusterPlatformType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CLUSTER_PLATFORMS
            .iter()
            .find(|p| p.as_str() == s)
            .cloned()
            .ok_or_else(|| format!("unknown cluster platform: {}", s))
    }
}

impl Serialize for ClusterPlatformType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClusterPlatformType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(ClusterPlatformType::Other(s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_token: ApiToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_secret: Option<String>,
    #[serde(rename = "fqdn", default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(rename = "cloud", default)]
    pub platform: Option<ClusterPlatformType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub s3_credential: S3Credential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_registry: Option<ContainerRegistry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreateParams {
    #[serde(rename = "accessKey", skip_serializing_if = "Option::is_none")]
    pub artifacts_access_key_id: Option<String>,
    #[serde(rename = "bucketPath", skip_serializing_if = "Option::is_none")]
    pub artifacts_bucket_path: Option<String>,
    #[serde(rename = "secretKey", skip_serializing_if = "Option::is_none")]
    pub artifacts_secret_access_key: Option<String>,
    #[serde(rename = "fqdn")]
    pub domain: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    pub name: String,
    #[serde(rename = "cloud", skip_serializing_if = "Option::is_none")]
    pub platform: Option<ClusterPlatformType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Always overwritten with [`DEFAULT_CLUSTER_TYPE`] on create.
    #[serde(rename = "type", default)]
    pub cluster_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_registry_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_registry_repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_registry_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_registry_password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterGetParams {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterUpdateAttributeParams {
    #[serde(rename = "fqdn", skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterUpdateRegistryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpdateS3Params {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpdateParams {
    pub attributes: ClusterUpdateAttributeParams,
    #[serde(skip_serializing_if = "is_false")]
    pub create_new_token: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_new_cluster_secret: bool,
    pub registry_attributes: ClusterUpdateRegistryParams,
    pub id: String,
    #[serde(skip_serializing_if = "is_false")]
    pub retry_workflow: bool,
    pub s3_attributes: ClusterUpdateS3Params,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_wire_names() {
        assert_eq!(
            serde_json::to_value(ClusterPlatformType::Dgx).unwrap(),
            json!("nvidia-dgx")
        );
        assert_eq!(
            "paperspace-cloud".parse::<ClusterPlatformType>().unwrap(),
            ClusterPlatformType::Paperspace
        );
        assert!("openstack".parse::<ClusterPlatformType>().is_err());
    }

    #[test]
    fn test_platform_regions() {
        assert!(ClusterPlatformType::Aws.regions().contains(&"us-east-1"));
        assert_eq!(ClusterPlatformType::Gcp.regions().len(), 6);
        assert!(ClusterPlatformType::Metal.regions().is_empty());
    }

    #[test]
    fn test_create_params_shape() {
        let params = ClusterCreateParams {
            domain: "cluster.example.com".to_string(),
            name: "training".to_string(),
            platform: Some(ClusterPlatformType::Aws),
            region: Some("us-east-1".to_string()),
            artifacts_bucket_path: Some("s3://bucket/path".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "fqdn": "cluster.example.com",
                "name": "training",
                "cloud": "aws",
                "region": "us-east-1",
                "bucketPath": "s3://bucket/path",
                "type": 0
            })
        );
    }

    #[test]
    fn test_cluster_deserialize() {
        let cluster: Cluster = serde_json::from_value(json!({
            "id": "cluster-1",
            "name": "training",
            "fqdn": "cluster.example.com",
            "cloud": "gcp",
            "apiToken": {"key": "tok"},
            "s3Credential": {"accessKey": "ak", "bucket": "b"},
            "teamId": "team-1",
            "type": "Kubernetes Processing Site"
        }))
        .unwrap();

        assert_eq!(cluster.platform, Some(ClusterPlatformType::Gcp));
        assert_eq!(cluster.api_token.key, "tok");
        assert_eq!(cluster.s3_credential.bucket, "b");
        assert!(cluster.container_registry.is_none());
    }

    #[test]
    fn test_cluster_unknown_platform_and_nulls() {
        let cluster: Cluster = serde_json::from_value(json!({
            "cloud": "oci",
            "name": null,
            "apiToken": null,
            "teamId": null
        }))
        .unwrap();

        assert_eq!(
            cluster.platform,
            Some(ClusterPlatformType::Other("oci".to_string()))
        );
        assert_eq!(cluster.id, "");
        assert_eq!(cluster.name, "");
        assert_eq!(cluster.api_token.key, "");
        assert_eq!(serde_json::to_value(&cluster.platform).unwrap(), json!("oci"));
        assert!(cluster.platform.unwrap().regions().is_empty());
    }
}
