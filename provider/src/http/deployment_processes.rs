//! Deployment process API client

use async_trait::async_trait;
use octopus_client::DeploymentProcess;

use crate::api::DeploymentProcessApi;
use crate::errors::ProviderError;
use crate::http::client::HttpClient;

fn process_path(id: &str) -> String {
    format!("/api/deploymentprocesses/{}", id)
}

#[async_trait]
impl DeploymentProcessApi for HttpClient {
    async fn get_deployment_process(&self, id: &str) -> Result<DeploymentProcess, ProviderError> {
        self.get(&process_path(id)).await
    }

    async fn update_deployment_process(
        &self,
        process: &DeploymentProcess,
    ) -> Result<DeploymentProcess, ProviderError> {
        let id = process.id.as_deref().ok_or_else(|| {
            ProviderError::Internal("cannot update a deployment process without an id".to_string())
        })?;
        self.put(&process_path(id), process).await
    }
}
