use crate::core::client::{to_params, Client};
use crate::domain::model::{MlModel, UpdateModelParams};
use crate::domain::ports::{Method, RequestParams};
use crate::utils::error::Result;

impl Client {
    pub async fn update_model(
        &self,
        params: UpdateModelParams,
        request_params: &RequestParams,
    ) -> Result<MlModel> {
        self.request(
            Method::Post,
            "/mlModels/updateModel",
            to_params(&params)?,
            request_params,
        )
        .await
    }
}
