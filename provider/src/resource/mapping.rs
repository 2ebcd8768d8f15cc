//! Translation between project configuration and Octopus entities

use octopus_client::{DeploymentAction, DeploymentProcess, DeploymentStep, Project, PropertyBag};

use crate::errors::ProviderError;
use crate::models::project::ProjectConfig;
use crate::models::step::DeploymentStep as StepConfig;

/// Octopus decides when to acquire packages for each step
pub const PACKAGE_REQUIREMENT: &str = "LetOctopusDecide";

// TODO: expose package_id on step blocks instead of this placeholder
pub const PLACEHOLDER_PACKAGE_ID: &str = "a";

const FEATURE_CONFIGURATION_TRANSFORMS: &str = "Octopus.Features.ConfigurationTransforms";
const FEATURE_CONFIGURATION_VARIABLES: &str = "Octopus.Features.ConfigurationVariables";
const FEATURE_JSON_CONFIGURATION_VARIABLES: &str = "Octopus.Features.JsonConfigurationVariables";

pub const ENABLED_FEATURES: &str = "Octopus.Action.EnabledFeatures";
pub const TARGET_ROLES: &str = "Octopus.Action.TargetRoles";
pub const JSON_VARIABLES_TARGETS: &str = "Octopus.Action.Package.JsonConfigurationVariablesTargets";
pub const JSON_VARIABLES_ENABLED: &str = "Octopus.Action.Package.JsonConfigurationVariablesEnabled";

/// Build the project entity to submit on create or update
pub fn build_project(config: &ProjectConfig) -> Project {
    let mut project = Project::new(&config.name, &config.lifecycle_id, &config.project_group_id);

    if !config.description.is_empty() {
        project.description = config.description.clone();
    }

    project.default_guided_failure_mode = Some(config.default_failure_mode.to_string());
    project.project_connectivity_policy.skip_machine_behavior =
        config.skip_machine_behavior.to_string();

    project
}

/// Copy the scalar fields of a fetched project back into configuration
pub fn apply_project(config: &mut ProjectConfig, project: &Project) -> Result<(), ProviderError> {
    config.name = project.name.clone();
    config.description = project.description.clone();
    config.lifecycle_id = project.lifecycle_id.clone();
    config.project_group_id = project.project_group_id.clone();

    if let Some(mode) = &project.default_guided_failure_mode {
        config.default_failure_mode = mode.parse().map_err(ProviderError::Internal)?;
    }
    config.skip_machine_behavior = project
        .project_connectivity_policy
        .skip_machine_behavior
        .parse()
        .map_err(ProviderError::Internal)?;

    if project.deployment_process_id.is_some() {
        config.deployment_process_id = project.deployment_process_id.clone();
    }

    Ok(())
}

/// Replace every step of `process` with the steps described by `config`.
///
/// Windows service steps come first, then IIS steps, each in configuration
/// order. Everything else on the process (id, version) is kept.
pub fn build_deployment_process(config: &ProjectConfig, mut process: DeploymentProcess) -> DeploymentProcess {
    process.steps = config.steps().map(build_step).collect();
    process
}

fn build_step(step: StepConfig<'_>) -> DeploymentStep {
    let kind = step.kind();
    let common = kind.common();

    let mut features = vec![
        kind.feature(),
        FEATURE_CONFIGURATION_TRANSFORMS,
        FEATURE_CONFIGURATION_VARIABLES,
    ];

    let mut properties = kind.action_properties();
    properties.insert(
        "Octopus.Action.Package.AutomaticallyRunConfigurationTransformationFiles".to_string(),
        common.configuration_transforms.to_string(),
    );
    properties.insert(
        "Octopus.Action.Package.AutomaticallyUpdateAppSettingsAndConnectionStrings".to_string(),
        common.configuration_variables.to_string(),
    );
    properties.insert("Octopus.Action.Package.FeedId".to_string(), common.feed_id.clone());
    properties.insert(
        "Octopus.Action.Package.PackageId".to_string(),
        PLACEHOLDER_PACKAGE_ID.to_string(),
    );
    properties.insert(
        "Octopus.Action.Package.DownloadOnTentacle".to_string(),
        "False".to_string(),
    );

    if !common.json_file_variable_replacement.is_empty() {
        properties.insert(
            JSON_VARIABLES_TARGETS.to_string(),
            common.json_file_variable_replacement.clone(),
        );
        properties.insert(JSON_VARIABLES_ENABLED.to_string(), "True".to_string());
        features.push(FEATURE_JSON_CONFIGURATION_VARIABLES);
    }

    properties.insert(ENABLED_FEATURES.to_string(), features.join(","));

    let mut step_properties = PropertyBag::new();
    step_properties.insert(TARGET_ROLES.to_string(), common.target_roles.join(","));

    DeploymentStep {
        id: None,
        name: common.step_name.clone(),
        package_requirement: PACKAGE_REQUIREMENT.to_string(),
        condition: common.step_condition.octopus_value().to_string(),
        start_trigger: common.step_start_trigger.to_string(),
        properties: step_properties,
        actions: vec![DeploymentAction {
            id: None,
            name: common.step_name.clone(),
            action_type: kind.action_type().to_string(),
            is_disabled: false,
            environments: Vec::new(),
            properties,
        }],
    }
}
