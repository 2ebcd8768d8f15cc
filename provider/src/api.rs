//! Remote API capabilities consumed by the resource

use async_trait::async_trait;
use octopus_client::{DeploymentProcess, Project};

use crate::errors::ProviderError;

/// Project endpoints
///
/// `get_project` must return [`ProviderError::NotFound`] when the project
/// does not exist.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn get_project(&self, id: &str) -> Result<Project, ProviderError>;

    async fn add_project(&self, project: &Project) -> Result<Project, ProviderError>;

    /// Overwrite the project identified by `project.id`
    async fn update_project(&self, project: &Project) -> Result<Project, ProviderError>;

    async fn delete_project(&self, id: &str) -> Result<(), ProviderError>;
}

/// Deployment process endpoints
#[async_trait]
pub trait DeploymentProcessApi: Send + Sync {
    async fn get_deployment_process(&self, id: &str) -> Result<DeploymentProcess, ProviderError>;

    /// Overwrite the process identified by `process.id`
    async fn update_deployment_process(
        &self,
        process: &DeploymentProcess,
    ) -> Result<DeploymentProcess, ProviderError>;
}

/// Everything the project resource needs from the server
pub trait OctopusApi: ProjectApi + DeploymentProcessApi {}

impl<T: ProjectApi + DeploymentProcessApi + ?Sized> OctopusApi for T {}
