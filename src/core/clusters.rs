use crate::core::client::{encode, to_params, Client};
use crate::domain::model::{
    Cluster, ClusterCreateParams, ClusterGetParams, ClusterListParams, ClusterUpdateParams,
    DEFAULT_CLUSTER_TYPE,
};
use crate::domain::ports::{Method, RequestParams};
use crate::utils::error::Result;

impl Client {
    /// Registers a cluster. The cluster type is always [`DEFAULT_CLUSTER_TYPE`].
    pub async fn create_cluster(
        &self,
        mut params: ClusterCreateParams,
        request_params: &RequestParams,
    ) -> Result<Cluster> {
        params.cluster_type = DEFAULT_CLUSTER_TYPE;
        tracing::debug!("Creating cluster {}", params.name);

        self.request(
            Method::Post,
            "/clusters/createCluster",
            to_params(&params)?,
            request_params,
        )
        .await
    }

    pub async fn get_cluster(
        &self,
        id: &str,
        _params: ClusterGetParams,
        request_params: &RequestParams,
    ) -> Result<Cluster> {
        let path = format!("/clusters/getCluster?id={}", encode(id));
        self.request(Method::Get, &path, None, request_params).await
    }

    pub async fn get_clusters(
        &self,
        params: ClusterListParams,
        request_params: &RequestParams,
    ) -> Result<Vec<Cluster>> {
        let clusters: Option<Vec<Cluster>> = self
            .request(
                Method::Get,
                "/clusters/getClusters",
                to_params(&params)?,
                request_params,
            )
            .await?;
        Ok(clusters.unwrap_or_default())
    }

    /// Updates a cluster; `id` takes precedence over `params.id`.
    pub async fn update_cluster(
        &self,
        id: &str,
        mut params: ClusterUpdateParams,
        request_params: &RequestParams,
    ) -> Result<Cluster> {
        params.id = id.to_string();

        self.request(
            Method::Post,
            "/clusters/updateCluster",
            to_params(&params)?,
            request_params,
        )
        .await
    }
}
