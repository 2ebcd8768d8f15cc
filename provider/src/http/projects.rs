//! Project API client

use async_trait::async_trait;
use octopus_client::Project;

use crate::api::ProjectApi;
use crate::errors::ProviderError;
use crate::http::client::HttpClient;

fn project_path(id: &str) -> String {
    format!("/api/projects/{}", id)
}

#[async_trait]
impl ProjectApi for HttpClient {
    async fn get_project(&self, id: &str) -> Result<Project, ProviderError> {
        self.get(&project_path(id)).await
    }

    async fn add_project(&self, project: &Project) -> Result<Project, ProviderError> {
        self.post("/api/projects", project).await
    }

    async fn update_project(&self, project: &Project) -> Result<Project, ProviderError> {
        let id = project
            .id
            .as_deref()
            .ok_or_else(|| ProviderError::Internal("cannot update a project without an id".to_string()))?;
        self.put(&project_path(id), project).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ProviderError> {
        self.delete(&project_path(id)).await
    }
}
