//! Lifecycle operations of the project resource
//!
//! Each operation takes the API client explicitly and mutates the tracked
//! [`ResourceState`]. Remote failures are wrapped with the operation that
//! was running and returned immediately; nothing is retried or rolled back.

use tracing::{debug, info, warn};

use crate::api::OctopusApi;
use crate::errors::{ProviderError, ResultExt};
use crate::resource::mapping::{apply_project, build_deployment_process, build_project};
use crate::resource::ResourceState;

/// Create the project, then write its deployment process
///
/// If the process update fails the project stays created and the id stays
/// tracked.
pub async fn create<C>(client: &C, state: &mut ResourceState) -> Result<(), ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let project = build_project(&state.config);

    let created = client
        .add_project(&project)
        .await
        .context("error creating project")?;

    let id = created.id.clone().ok_or_else(|| {
        ProviderError::Internal("server returned a project without an id".to_string())
            .context("error creating project")
    })?;
    info!("Created project {} ({})", created.name, id);
    state.set_id(id);

    update_deployment_process(client, state, created.deployment_process_id.as_deref())
        .await
        .context("error creating deploymentprocess")
}

/// Refresh scalar fields from the server
///
/// A project that no longer exists clears the tracked id instead of failing.
pub async fn read<C>(client: &C, state: &mut ResourceState) -> Result<(), ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let id = state.require_id()?;

    let project = match client.get_project(&id).await {
        Ok(project) => project,
        Err(e) if e.is_not_found() => {
            warn!("Project {} no longer exists, removing it from state", id);
            state.clear_id();
            return Ok(());
        }
        Err(e) => return Err(e.context(format!("error reading project id {}", id))),
    };

    debug!("project: {:?}", project);
    apply_project(&mut state.config, &project)
}

/// Overwrite the project and its deployment process with the configuration
pub async fn update<C>(client: &C, state: &mut ResourceState) -> Result<(), ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let id = state.require_id()?;

    let mut project = build_project(&state.config);
    project.id = Some(id.clone());

    let updated = client
        .update_project(&project)
        .await
        .with_context(|| format!("error updating project id {}", id))?;

    if let Some(new_id) = &updated.id {
        state.set_id(new_id.clone());
    }
    info!("Updated project {}", state.id().unwrap_or(&id));

    update_deployment_process(client, state, updated.deployment_process_id.as_deref())
        .await
        .context("error creating deploymentprocess")
}

/// Delete the project and clear the tracked id
pub async fn delete<C>(client: &C, state: &mut ResourceState) -> Result<(), ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let id = state.require_id()?;

    client
        .delete_project(&id)
        .await
        .with_context(|| format!("error deleting project id {}", id))?;

    info!("Deleted project {}", id);
    state.clear_id();
    Ok(())
}

/// Fetch the project's process, replace its steps and submit it
async fn update_deployment_process<C>(
    client: &C,
    state: &mut ResourceState,
    process_id: Option<&str>,
) -> Result<(), ProviderError>
where
    C: OctopusApi + ?Sized,
{
    let process_id = process_id.ok_or_else(|| {
        ProviderError::Internal("project has no deployment process".to_string())
            .context("error getting deployment process for project")
    })?;

    let existing = client
        .get_deployment_process(process_id)
        .await
        .context("error getting deployment process for project")?;

    let process = build_deployment_process(&state.config, existing);
    debug!(
        "Submitting {} step(s) to deployment process {}",
        process.steps.len(),
        process_id
    );

    let updated = client
        .update_deployment_process(&process)
        .await
        .context("error creating deployment process for project")?;

    state.config.deployment_process_id = updated.id;
    Ok(())
}
