use crate::core::client::{encode, to_params, Client};
use crate::domain::model::{Machine, MachineCreateParams, MachineListParams, MachineUpdateParams};
use crate::domain::ports::{Method, RequestParams};
use crate::utils::error::Result;

impl Client {
    pub async fn create_machine(
        &self,
        params: MachineCreateParams,
        request_params: &RequestParams,
    ) -> Result<Machine> {
        tracing::debug!("Creating {} machine in {}", params.machine_type, params.region);
        self.request(
            Method::Post,
            "/machines/createSingleMachinePublic",
            to_params(&params)?,
            request_params,
        )
        .await
    }

    pub async fn get_machine(&self, id: &str, request_params: &RequestParams) -> Result<Machine> {
        let path = format!("/machines/getMachinePublic?machineId={}", encode(id));
        self.request(Method::Get, &path, None, request_params).await
    }

    pub async fn get_machines(
        &self,
        params: MachineListParams,
        request_params: &RequestParams,
    ) -> Result<Vec<Machine>> {
        let machines: Option<Vec<Machine>> = self
            .request(
                Method::Get,
                "/machines/getMachines",
                to_params(&params)?,
                request_params,
            )
            .await?;
        Ok(machines.unwrap_or_default())
    }

    pub async fn update_machine(
        &self,
        params: MachineUpdateParams,
        request_params: &RequestParams,
    ) -> Result<Machine> {
        self.request(
            Method::Post,
            "/machines/updateMachine",
            to_params(&params)?,
            request_params,
        )
        .await
    }

    pub async fn delete_machine(&self, id: &str, request_params: &RequestParams) -> Result<()> {
        let path = format!("/machines/{}/destroyMachine", id);
        self.request_no_content(Method::Post, &path, None, request_params)
            .await
    }
}
