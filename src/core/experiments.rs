use crate::core::client::{to_params, Client};
use crate::domain::model::experiment::ExperimentEnvelope;
use crate::domain::model::{Experiment, ExperimentParams};
use crate::domain::ports::{Method, RequestParams};
use crate::utils::error::Result;

impl Client {
    /// Starts an experiment run and returns the created experiment.
    pub async fn run_experiment(
        &self,
        params: ExperimentParams,
        request_params: &RequestParams,
    ) -> Result<Experiment> {
        let envelope: ExperimentEnvelope = self
            .request(
                Method::Post,
                "/experiments/v2/run",
                to_params(&params)?,
                request_params,
            )
            .await?;

        tracing::debug!("Started experiment {}", envelope.data.handle);
        Ok(envelope.data)
    }
}
