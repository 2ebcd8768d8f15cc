//! Resource state persistence

use tracing::debug;

use crate::errors::ProviderError;
use crate::filesys::file::File;
use crate::resource::ResourceState;

/// Load state from file, or `None` if nothing has been applied yet
pub async fn load_state(file: &File) -> Result<Option<ResourceState>, ProviderError> {
    if !file.exists().await {
        return Ok(None);
    }
    debug!("Reading state from {}", file.path().display());
    let state = file.read_json::<ResourceState>().await?;
    Ok(Some(state))
}

/// Load state from file, failing if there is none
pub async fn require_state(file: &File) -> Result<ResourceState, ProviderError> {
    load_state(file).await?.ok_or_else(|| {
        ProviderError::StateError(format!("no state at {}", file.path().display()))
    })
}

/// Save state to file
pub async fn save_state(file: &File, state: &ResourceState) -> Result<(), ProviderError> {
    debug!("Writing state to {}", file.path().display());
    file.write_json(state).await
}
