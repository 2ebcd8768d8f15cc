//! Project configuration model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProviderError;
use crate::models::step::{DeploymentStep, IisWebsiteStep, WindowsServiceStep};
use crate::schema::{project_schema, validate};

/// Declares a string-valued enum with case-insensitive parsing.
///
/// The listed literals are the canonical spellings; they are what the
/// schema advertises and what is written back to state.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $literal:literal),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($literal),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($literal) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!(
                    "invalid {}: {:?} (expected one of {})",
                    stringify!($name),
                    s,
                    Self::VALUES.join(", ")
                ))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Guided failure mode used when a deployment of the project fails
    pub enum FailureMode {
        EnvironmentDefault => "EnvironmentDefault",
        Off => "Off",
        On => "On",
    }
    default = EnvironmentDefault;
}

string_enum! {
    /// What to do with deployment targets that are unavailable
    pub enum SkipMachineBehavior {
        SkipUnavailableMachines => "SkipUnavailableMachines",
        None => "None",
    }
    default = None;
}

/// Configuration of an `octopusdeploy_project` resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,

    pub lifecycle_id: String,

    pub project_group_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub default_failure_mode: FailureMode,

    #[serde(default)]
    pub skip_machine_behavior: SkipMachineBehavior,

    /// Computed from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_process_id: Option<String>,

    #[serde(default)]
    pub deployment_step_windows_service: Vec<WindowsServiceStep>,

    #[serde(default)]
    pub deployment_step_iis_website: Vec<IisWebsiteStep>,
}

impl ProjectConfig {
    /// Validate a raw configuration block and bind it
    pub fn from_raw(raw: Value) -> Result<Self, ProviderError> {
        let normalized = validate(&project_schema(), raw)?;
        Ok(serde_json::from_value(normalized)?)
    }

    /// A minimal configuration with every optional field at its default
    pub fn new(
        name: impl Into<String>,
        lifecycle_id: impl Into<String>,
        project_group_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lifecycle_id: lifecycle_id.into(),
            project_group_id: project_group_id.into(),
            description: String::new(),
            default_failure_mode: FailureMode::default(),
            skip_machine_behavior: SkipMachineBehavior::default(),
            deployment_process_id: None,
            deployment_step_windows_service: Vec::new(),
            deployment_step_iis_website: Vec::new(),
        }
    }

    /// Every configured step, Windows service steps first
    pub fn steps(&self) -> impl Iterator<Item = DeploymentStep<'_>> {
        self.deployment_step_windows_service
            .iter()
            .map(DeploymentStep::WindowsService)
            .chain(
                self.deployment_step_iis_website
                    .iter()
                    .map(DeploymentStep::IisWebsite),
            )
    }
}
