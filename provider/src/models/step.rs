//! Deployment step configuration
//!
//! Both step kinds share [`StepCommon`]; kind-specific settings become the
//! action's property bag through [`StepKind`].

use serde::{Deserialize, Serialize};

use octopus_client::PropertyBag;

use crate::models::project::string_enum;

pub const DEFAULT_FEED_ID: &str = "feeds-builtin";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "LocalSystem";

string_enum! {
    /// When a step runs relative to the outcome of earlier steps
    pub enum StepCondition {
        Success => "success",
        Failure => "failure",
        Always => "always",
        Variable => "variable",
    }
    default = Success;
}

impl StepCondition {
    /// Spelling used by the Octopus API. The server's own casing is sent
    /// rather than the configured lowercase value.
    pub fn octopus_value(&self) -> &'static str {
        match self {
            StepCondition::Success => "Success",
            StepCondition::Failure => "Failure",
            StepCondition::Always => "Always",
            StepCondition::Variable => "Variable",
        }
    }
}

string_enum! {
    /// Whether a step waits for the previous one
    pub enum StartTrigger {
        StartAfterPrevious => "StartAfterPrevious",
        StartWithPrevious => "StartWithPrevious",
    }
    default = StartAfterPrevious;
}

string_enum! {
    pub enum ServiceStartMode {
        Auto => "auto",
        DelayedAuto => "delayed-auto",
        Demand => "demand",
        Unchanged => "unchanged",
    }
    default = Auto;
}

string_enum! {
    /// .NET CLR version of an IIS application pool
    pub enum AppPoolFramework {
        V2 => "v2.0",
        V4 => "v4.0",
    }
    default = V4;
}

string_enum! {
    /// Built-in account an IIS application pool runs under
    pub enum AppPoolIdentity {
        ApplicationPoolIdentity => "ApplicationPoolIdentity",
        LocalService => "LocalService",
        LocalSystem => "LocalSystem",
        NetworkService => "NetworkService",
        SpecificUser => "SpecificUser",
    }
    default = ApplicationPoolIdentity;
}

fn default_true() -> bool {
    true
}

fn default_feed_id() -> String {
    DEFAULT_FEED_ID.to_string()
}

fn default_service_account() -> String {
    DEFAULT_SERVICE_ACCOUNT.to_string()
}

/// Settings shared by every step kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCommon {
    pub step_name: String,

    #[serde(default)]
    pub step_condition: StepCondition,

    #[serde(default)]
    pub step_start_trigger: StartTrigger,

    pub target_roles: Vec<String>,

    #[serde(default = "default_feed_id")]
    pub feed_id: String,

    #[serde(default = "default_true")]
    pub configuration_transforms: bool,

    #[serde(default = "default_true")]
    pub configuration_variables: bool,

    /// Comma-separated files, relative to the package, to run JSON variable replacement on
    #[serde(default)]
    pub json_file_variable_replacement: String,
}

impl StepCommon {
    pub fn new(step_name: impl Into<String>, target_roles: Vec<String>) -> Self {
        Self {
            step_name: step_name.into(),
            step_condition: StepCondition::default(),
            step_start_trigger: StartTrigger::default(),
            target_roles,
            feed_id: default_feed_id(),
            configuration_transforms: true,
            configuration_variables: true,
            json_file_variable_replacement: String::new(),
        }
    }
}

/// Installs or reconfigures a Windows service from a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowsServiceStep {
    #[serde(flatten)]
    pub common: StepCommon,

    pub executable_path: String,

    pub service_name: String,

    #[serde(default = "default_service_account")]
    pub service_account: String,

    #[serde(default)]
    pub service_start_mode: ServiceStartMode,
}

/// Creates or updates an IIS web site from a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IisWebsiteStep {
    #[serde(flatten)]
    pub common: StepCommon,

    pub website_name: String,

    #[serde(default)]
    pub anonymous_authentication: bool,

    #[serde(default)]
    pub basic_authentication: bool,

    #[serde(default = "default_true")]
    pub windows_authentication: bool,

    pub application_pool_name: String,

    #[serde(default)]
    pub application_pool_framework: AppPoolFramework,

    #[serde(default)]
    pub application_pool_identity: AppPoolIdentity,
}

/// Behaviour every step kind provides to the process builder
pub trait StepKind {
    fn common(&self) -> &StepCommon;

    /// Octopus action type, e.g. `Octopus.IIS`
    fn action_type(&self) -> &'static str;

    /// Feature token listed first in `Octopus.Action.EnabledFeatures`
    fn feature(&self) -> &'static str;

    /// Kind-specific action properties
    fn action_properties(&self) -> PropertyBag;
}

fn bag<const N: usize>(entries: [(&str, String); N]) -> PropertyBag {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl StepKind for WindowsServiceStep {
    fn common(&self) -> &StepCommon {
        &self.common
    }

    fn action_type(&self) -> &'static str {
        "Octopus.WindowsService"
    }

    fn feature(&self) -> &'static str {
        "Octopus.Features.WindowsService"
    }

    fn action_properties(&self) -> PropertyBag {
        bag([
            ("Octopus.Action.WindowsService.CreateOrUpdateService", "True".to_string()),
            ("Octopus.Action.WindowsService.ServiceAccount", self.service_account.clone()),
            ("Octopus.Action.WindowsService.StartMode", self.service_start_mode.to_string()),
            ("Octopus.Action.WindowsService.ServiceName", self.service_name.clone()),
            ("Octopus.Action.WindowsService.ExecutablePath", self.executable_path.clone()),
        ])
    }
}

/// Default binding: plain HTTP on port 80, all host names
const IIS_DEFAULT_BINDINGS: &str = r#"[{"protocol":"http","port":"80","host":"","thumbprint":null,"certificateVariable":null,"requireSni":false,"enabled":true}]"#;

impl StepKind for IisWebsiteStep {
    fn common(&self) -> &StepCommon {
        &self.common
    }

    fn action_type(&self) -> &'static str {
        "Octopus.IIS"
    }

    fn feature(&self) -> &'static str {
        "Octopus.Features.IISWebSite"
    }

    fn action_properties(&self) -> PropertyBag {
        let framework = self.application_pool_framework.to_string();
        let identity = self.application_pool_identity.to_string();

        bag([
            ("Octopus.Action.IISWebSite.DeploymentType", "webSite".to_string()),
            ("Octopus.Action.IISWebSite.CreateOrUpdateWebSite", "True".to_string()),
            ("Octopus.Action.IISWebSite.Bindings", IIS_DEFAULT_BINDINGS.to_string()),
            ("Octopus.Action.IISWebSite.ApplicationPoolFrameworkVersion", framework.clone()),
            ("Octopus.Action.IISWebSite.ApplicationPoolIdentityType", identity.clone()),
            (
                "Octopus.Action.IISWebSite.EnableAnonymousAuthentication",
                self.anonymous_authentication.to_string(),
            ),
            (
                "Octopus.Action.IISWebSite.EnableBasicAuthentication",
                self.basic_authentication.to_string(),
            ),
            (
                "Octopus.Action.IISWebSite.EnableWindowsAuthentication",
                self.windows_authentication.to_string(),
            ),
            ("Octopus.Action.IISWebSite.WebApplication.ApplicationPoolFrameworkVersion", framework),
            ("Octopus.Action.IISWebSite.WebApplication.ApplicationPoolIdentityType", identity),
            ("Octopus.Action.IISWebSite.WebRootType", "packageRoot".to_string()),
            ("Octopus.Action.IISWebSite.StartApplicationPool", "True".to_string()),
            ("Octopus.Action.IISWebSite.StartWebSite", "True".to_string()),
            ("Octopus.Action.IISWebSite.WebSiteName", self.website_name.clone()),
            ("Octopus.Action.IISWebSite.ApplicationPoolName", self.application_pool_name.clone()),
        ])
    }
}

/// A configured step of either kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeploymentStep<'a> {
    WindowsService(&'a WindowsServiceStep),
    IisWebsite(&'a IisWebsiteStep),
}

impl<'a> DeploymentStep<'a> {
    pub fn kind(&self) -> &'a dyn StepKind {
        match *self {
            DeploymentStep::WindowsService(step) => step as &dyn StepKind,
            DeploymentStep::IisWebsite(step) => step as &dyn StepKind,
        }
    }

    pub fn common(&self) -> &'a StepCommon {
        self.kind().common()
    }
}
