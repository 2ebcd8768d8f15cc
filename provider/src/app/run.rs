//! Command execution

use serde_json::Value;
use tracing::info;

use crate::api::OctopusApi;
use crate::app::options::{AppOptions, Command};
use crate::errors::{ProviderError, ResultExt};
use crate::filesys::file::File;
use crate::http::client::HttpClient;
use crate::models::project::ProjectConfig;
use crate::resource::{self, ResourceState};
use crate::schema::schema_json;
use crate::storage::settings::Settings;
use crate::storage::state::{load_state, require_state, save_state};
use crate::utils::version_info;

/// Run one command and return what should be printed to stdout
pub async fn run(options: &AppOptions, settings: &Settings) -> Result<Value, ProviderError> {
    match options.command {
        Command::Version => Ok(serde_json::to_value(version_info())?),
        Command::Schema => Ok(schema_json()),
        Command::Validate => {
            let config = read_config(required_config(options)?).await?;
            Ok(serde_json::to_value(config)?)
        }
        Command::Apply | Command::Refresh | Command::Destroy => {
            settings.octopus.validate()?;
            let client = HttpClient::new(
                &settings.octopus.address,
                settings.octopus.require_api_key()?,
                settings.octopus.timeout(),
            )?;
            info!("Using Octopus server at {}", client.base_url());

            let state = match options.command {
                Command::Apply => apply(&client, required_config(options)?, &options.state_file).await?,
                Command::Refresh => refresh(&client, &options.state_file).await?,
                _ => destroy(&client, &options.state_file).await?,
            };
            Ok(serde_json::to_value(state)?)
        }
    }
}

fn required_config(options: &AppOptions) -> Result<&File, ProviderError> {
    options
        .config_file
        .as_ref()
        .ok_or_else(|| ProviderError::ConfigError("--config=FILE is required".to_string()))
}

/// Read and validate a configuration block
pub async fn read_config(file: &File) -> Result<ProjectConfig, ProviderError> {
    let raw = file
        .read_json::<Value>()
        .await
        .with_context(|| format!("error reading {}", file.path().display()))?;
    ProjectConfig::from_raw(raw)
}

/// Create the project if state has no id, otherwise update it
///
/// State is saved whenever an id is tracked, including after a failed
/// deployment process write, so a later apply updates instead of creating
/// a duplicate.
pub async fn apply<C>(client: &C, config_file: &File, state_file: &File) -> Result<ResourceState, ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let config = read_config(config_file).await?;

    let (state, result) = match load_state(state_file).await? {
        Some(mut state) if state.id().is_some() => {
            let process_id = state.config.deployment_process_id.take();
            state.config = config;
            state.config.deployment_process_id = process_id;
            let result = resource::update(client, &mut state).await;
            (state, result)
        }
        _ => {
            let mut state = ResourceState::new(config);
            let result = resource::create(client, &mut state).await;
            (state, result)
        }
    };

    if state.id().is_some() {
        save_state(state_file, &state).await?;
    }
    result?;
    Ok(state)
}

/// Read the project back into state; state is removed if the project is gone
pub async fn refresh<C>(client: &C, state_file: &File) -> Result<ResourceState, ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let mut state = require_state(state_file).await?;
    resource::read(client, &mut state).await?;

    if state.id().is_none() {
        state_file.delete().await?;
    } else {
        save_state(state_file, &state).await?;
    }
    Ok(state)
}

/// Delete the project and remove state
pub async fn destroy<C>(client: &C, state_file: &File) -> Result<ResourceState, ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let mut state = require_state(state_file).await?;
    resource::delete(client, &mut state).await?;
    state_file.delete().await?;
    Ok(state)
}
