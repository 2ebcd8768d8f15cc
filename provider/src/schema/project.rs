//! Schema of the `octopusdeploy_project` resource

use serde_json::{json, Value};

use crate::models::project::{FailureMode, SkipMachineBehavior};
use crate::models::step::{
    AppPoolFramework, AppPoolIdentity, ServiceStartMode, StartTrigger, StepCondition,
    DEFAULT_FEED_ID, DEFAULT_SERVICE_ACCOUNT,
};
use crate::schema::attribute::{Attribute, Block};

pub const RESOURCE_NAME: &str = "octopusdeploy_project";

/// Attributes shared by every deployment step block
fn standard_step_block() -> Block {
    Block::new()
        .with_attribute(Attribute::optional_bool("configuration_transforms").with_default(true))
        .with_attribute(Attribute::optional_bool("configuration_variables").with_default(true))
        .with_attribute(Attribute::optional_string("feed_id").with_default(DEFAULT_FEED_ID))
        .with_attribute(
            Attribute::optional_string("step_condition")
                .with_default(StepCondition::default().as_str())
                .one_of(StepCondition::VALUES),
        )
        .with_attribute(Attribute::required_string("step_name"))
        .with_attribute(
            Attribute::optional_string("step_start_trigger")
                .with_default(StartTrigger::default().as_str())
                .one_of(StartTrigger::VALUES),
        )
        .with_attribute(Attribute::required_string_list("target_roles"))
        .with_attribute(Attribute::optional_string("json_file_variable_replacement").with_description(
            "A comma-separated list of file names to replace settings in, relative to the package contents.",
        ))
}

fn iis_application_pool_block() -> Block {
    Block::new()
        .with_attribute(
            Attribute::required_string("application_pool_name")
                .with_description("Name of the application pool in IIS to create or reconfigure."),
        )
        .with_attribute(
            Attribute::optional_string("application_pool_framework")
                .with_default(AppPoolFramework::default().as_str())
                .one_of(AppPoolFramework::VALUES)
                .with_description(
                    "The version of the .NET common language runtime that this application pool will use. \
                     Choose v2.0 for applications built against .NET 2.0, 3.0 or 3.5. Choose v4.0 for .NET 4.0 or 4.5.",
                ),
        )
        .with_attribute(
            Attribute::optional_string("application_pool_identity")
                .with_default(AppPoolIdentity::default().as_str())
                .one_of(AppPoolIdentity::VALUES)
                .with_description("Which built-in account will the application pool run under."),
        )
}

fn windows_service_step_block() -> Block {
    Block::new()
        .with_attribute(Attribute::required_string("executable_path"))
        .with_attribute(
            Attribute::optional_string("service_account").with_default(DEFAULT_SERVICE_ACCOUNT),
        )
        .with_attribute(Attribute::required_string("service_name"))
        .with_attribute(
            Attribute::optional_string("service_start_mode")
                .with_default(ServiceStartMode::default().as_str())
                .one_of(ServiceStartMode::VALUES),
        )
        .extend(standard_step_block())
}

fn iis_website_step_block() -> Block {
    Block::new()
        .with_attribute(
            Attribute::optional_bool("anonymous_authentication")
                .with_default(false)
                .with_description("Whether IIS should allow anonymous authentication."),
        )
        .with_attribute(
            Attribute::optional_bool("basic_authentication")
                .with_default(false)
                .with_description("Whether IIS should allow basic authentication with a 401 challenge."),
        )
        .with_attribute(
            Attribute::required_string("website_name").with_description("Create or update an IIS Web Site"),
        )
        .with_attribute(
            Attribute::optional_bool("windows_authentication")
                .with_default(true)
                .with_description(
                    "Whether IIS should allow integrated Windows authentication with a 401 challenge.",
                ),
        )
        .extend(standard_step_block())
        .extend(iis_application_pool_block())
}

/// The full resource block
pub fn project_schema() -> Block {
    Block::new()
        .with_attribute(Attribute::required_string("name"))
        .with_attribute(Attribute::computed_string("deployment_process_id"))
        .with_attribute(Attribute::required_string("lifecycle_id"))
        .with_attribute(Attribute::required_string("project_group_id"))
        .with_attribute(Attribute::optional_string("description"))
        .with_attribute(
            Attribute::optional_string("default_failure_mode")
                .with_default(FailureMode::default().as_str())
                .one_of(FailureMode::VALUES),
        )
        .with_attribute(
            Attribute::optional_string("skip_machine_behavior")
                .with_default(SkipMachineBehavior::default().as_str())
                .one_of(SkipMachineBehavior::VALUES),
        )
        .with_attribute(Attribute::optional_block_list(
            "deployment_step_windows_service",
            windows_service_step_block(),
        ))
        .with_attribute(Attribute::optional_block_list(
            "deployment_step_iis_website",
            iis_website_step_block(),
        ))
}

/// Schema document printed by `octoform --schema`
pub fn schema_json() -> Value {
    json!({
        "resource": RESOURCE_NAME,
        "block": project_schema(),
    })
}
