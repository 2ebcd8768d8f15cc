//! API models

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// String-keyed, string-valued settings bag used on steps and actions
pub type PropertyBag = BTreeMap<String, String>;

/// Project connectivity policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectConnectivityPolicy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_deployments_to_no_targets: bool,

    /// `None` or `SkipUnavailableMachines`
    #[serde(
        default = "default_skip_machine_behavior",
        deserialize_with = "null_as_skip_machine_default"
    )]
    pub skip_machine_behavior: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub target_roles: Vec<String>,
}

fn default_skip_machine_behavior() -> String {
    "None".to_string()
}

/// The server writes `null` for unset values; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_skip_machine_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|value| value.unwrap_or_else(default_skip_machine_behavior))
}

impl Default for ProjectConnectivityPolicy {
    fn default() -> Self {
        Self {
            allow_deployments_to_no_targets: false,
            skip_machine_behavior: default_skip_machine_behavior(),
            target_roles: Vec::new(),
        }
    }
}

/// Project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    /// Server-assigned ID, e.g. `Projects-1`
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(rename = "LifecycleId")]
    pub lifecycle_id: String,

    #[serde(rename = "ProjectGroupId")]
    pub project_group_id: String,

    /// `EnvironmentDefault`, `Off` or `On`; omitted to keep the server default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_guided_failure_mode: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_connectivity_policy: ProjectConnectivityPolicy,

    /// Server-assigned ID of the project's deployment process
    #[serde(rename = "DeploymentProcessId", default, skip_serializing_if = "Option::is_none")]
    pub deployment_process_id: Option<String>,

    #[serde(rename = "VariableSetId", default, skip_serializing_if = "Option::is_none")]
    pub variable_set_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_disabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_create_release: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub default_to_skip_if_already_installed: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub discrete_channel_release: bool,
}

impl Project {
    /// A new, unsaved project with server defaults for everything optional
    pub fn new(
        name: impl Into<String>,
        lifecycle_id: impl Into<String>,
        project_group_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lifecycle_id: lifecycle_id.into(),
            project_group_id: project_group_id.into(),
            ..Default::default()
        }
    }
}

/// Deployment process attached 1:1 to a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentProcess {
    /// e.g. `deploymentprocess-Projects-1`
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "ProjectId", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Optimistic concurrency token; must be echoed back on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(rename = "LastSnapshotId", default, skip_serializing_if = "Option::is_none")]
    pub last_snapshot_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<DeploymentStep>,
}

/// A step in a deployment process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentStep {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub package_requirement: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub start_trigger: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyBag,

    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<DeploymentAction>,
}

/// The single action carried by a step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentAction {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    pub action_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_disabled: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub environments: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PropertyBag,
}

/// Error body returned by the server on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub error_message: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            write!(f, "{}", self.error_message)
        } else {
            write!(f, "{} ({})", self.error_message, self.errors.join("; "))
        }
    }
}
