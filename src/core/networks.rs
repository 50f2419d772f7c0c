use crate::core::client::{to_params, Client};
use crate::domain::model::network::NetworkCreateBody;
use crate::domain::model::{
    region_id, Network, NetworkCreateParams, NetworkDeleteParams, NetworkGetParams,
    NetworkListParams,
};
use crate::domain::ports::{Method, RequestParams};
use crate::utils::error::{PaperspaceError, Result};

impl Client {
    /// Creates a private network. The region must be a name from `REGION_MAP`.
    pub async fn create_network(
        &self,
        params: NetworkCreateParams,
        request_params: &RequestParams,
    ) -> Result<Network> {
        let region_id = region_id(&params.region).ok_or_else(|| PaperspaceError::UnknownRegion {
            region: params.region.clone(),
        })?;

        let body = NetworkCreateBody {
            name: params.name,
            region_id,
        };
        self.request(Method::Post, "/networks", to_params(&body)?, request_params)
            .await
    }

    /// Looks a network up by id through the list endpoint.
    pub async fn get_network(
        &self,
        id: &str,
        _params: NetworkGetParams,
        request_params: &RequestParams,
    ) -> Result<Network> {
        let filter = NetworkListParams {
            id: Some(id.to_string()),
            ..Default::default()
        };
        let mut networks = self.get_networks(filter, request_params).await?;

        match networks.len() {
            0 => Err(PaperspaceError::NotFound {
                message: format!("no network found for ID {}", id),
            }),
            1 => Ok(networks.remove(0)),
            _ => Err(PaperspaceError::Ambiguous {
                message: format!("found more than one network for ID {}", id),
            }),
        }
    }

    pub async fn get_networks(
        &self,
        params: NetworkListParams,
        request_params: &RequestParams,
    ) -> Result<Vec<Network>> {
        let networks: Option<Vec<Network>> = self
            .request(Method::Get, "/networks", to_params(&params)?, request_params)
            .await?;
        Ok(networks.unwrap_or_default())
    }

    pub async fn delete_network(
        &self,
        id: &str,
        _params: NetworkDeleteParams,
        request_params: &RequestParams,
    ) -> Result<()> {
        let path = format!("/networks/{}", id);
        self.request_no_content(Method::Delete, &path, None, request_params)
            .await
    }
}
