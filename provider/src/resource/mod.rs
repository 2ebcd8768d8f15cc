//! The `octopusdeploy_project` resource

pub mod mapping;
pub mod project;

use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::models::project::ProjectConfig;

pub use mapping::{apply_project, build_deployment_process, build_project};
pub use project::{create, delete, read, update};

/// Tracked state of one resource instance: its remote id plus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Remote project id; `None` until created or after the project is gone
    #[serde(default)]
    pub id: Option<String>,

    pub config: ProjectConfig,
}

impl ResourceState {
    pub fn new(config: ProjectConfig) -> Self {
        Self { id: None, config }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// The tracked id, or an error if the resource has not been created
    pub fn require_id(&self) -> Result<String, ProviderError> {
        self.id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::StateError("resource has no id".to_string()))
    }
}
