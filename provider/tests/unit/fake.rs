//! In-memory Octopus API

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use octoform::api::{DeploymentProcessApi, ProjectApi};
use octoform::errors::ProviderError;
use octopus_client::{DeploymentProcess, Project};

/// Which call should fail on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    AddProject,
    GetProject,
    GetProcess,
    UpdateProcess,
}

#[derive(Default)]
struct Inner {
    next_id: u32,
    projects: HashMap<String, Project>,
    processes: HashMap<String, DeploymentProcess>,
    fail_on: Option<FailOn>,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeOctopus {
    inner: Mutex<Inner>,
}

impl FakeOctopus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, fail_on: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
    }

    pub fn project(&self, id: &str) -> Option<Project> {
        self.inner.lock().unwrap().projects.get(id).cloned()
    }

    pub fn process(&self, id: &str) -> Option<DeploymentProcess> {
        self.inner.lock().unwrap().processes.get(id).cloned()
    }

    pub fn project_count(&self) -> usize {
        self.inner.lock().unwrap().projects.len()
    }

    /// Remove a project behind the resource's back
    pub fn forget_project(&self, id: &str) {
        self.inner.lock().unwrap().projects.remove(id);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn check(inner: &mut Inner, call: &str, fail_on: FailOn) -> Result<(), ProviderError> {
        inner.calls.push(call.to_string());
        if inner.fail_on == Some(fail_on) {
            return Err(ProviderError::ApiError {
                status: 500,
                body: format!("{} failed", call),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectApi for FakeOctopus {
    async fn get_project(&self, id: &str) -> Result<Project, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&mut inner, "get_project", FailOn::GetProject)?;
        inner
            .projects
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("/api/projects/{}", id)))
    }

    async fn add_project(&self, project: &Project) -> Result<Project, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&mut inner, "add_project", FailOn::AddProject)?;

        inner.next_id += 1;
        let id = format!("Projects-{}", inner.next_id);
        let process_id = format!("deploymentprocess-{}", id);

        let mut created = project.clone();
        created.id = Some(id.clone());
        created.deployment_process_id = Some(process_id.clone());
        inner.projects.insert(id.clone(), created.clone());
        inner.processes.insert(
            process_id.clone(),
            DeploymentProcess {
                id: Some(process_id),
                project_id: Some(id),
                version: Some(0),
                ..Default::default()
            },
        );
        Ok(created)
    }

    async fn update_project(&self, project: &Project) -> Result<Project, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("update_project".to_string());

        let id = project.id.clone().unwrap_or_default();
        let existing = inner
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("/api/projects/{}", id)))?;

        let mut updated = project.clone();
        updated.deployment_process_id = existing.deployment_process_id;
        inner.projects.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_project(&self, id: &str) -> Result<(), ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("delete_project".to_string());
        inner
            .projects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ProviderError::NotFound(format!("/api/projects/{}", id)))
    }
}

#[async_trait]
impl DeploymentProcessApi for FakeOctopus {
    async fn get_deployment_process(&self, id: &str) -> Result<DeploymentProcess, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&mut inner, "get_deployment_process", FailOn::GetProcess)?;
        inner
            .processes
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("/api/deploymentprocesses/{}", id)))
    }

    async fn update_deployment_process(
        &self,
        process: &DeploymentProcess,
    ) -> Result<DeploymentProcess, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&mut inner, "update_deployment_process", FailOn::UpdateProcess)?;

        let mut updated = process.clone();
        updated.version = Some(process.version.unwrap_or_default() + 1);
        let id = updated.id.clone().unwrap_or_default();
        inner.processes.insert(id, updated.clone());
        Ok(updated)
    }
}
