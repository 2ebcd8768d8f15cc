//! Settings file management

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use tracing::debug;
use url::Url;

use crate::errors::ProviderError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Environment variable overriding the server address
pub const ENV_OCTOPUS_URL: &str = "OCTOPUS_URL";

/// Environment variable overriding the API key
pub const ENV_OCTOPUS_APIKEY: &str = "OCTOPUS_APIKEY";

/// Provider settings
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Octopus server connection
    #[serde(default)]
    pub octopus: OctopusSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            octopus: OctopusSettings::default(),
        }
    }
}

/// Octopus server settings
#[derive(Debug, Deserialize)]
pub struct OctopusSettings {
    /// Server address, e.g. `https://octopus.example.com`
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_address() -> String {
    "http://localhost:8065".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(SecretString::from))
}

impl Default for OctopusSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OctopusSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the address is an http(s) URL and an API key is present
    pub fn validate(&self) -> Result<(), ProviderError> {
        let url = Url::parse(&self.address).map_err(|e| {
            ProviderError::ConfigError(format!("invalid Octopus address {:?}: {}", self.address, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProviderError::ConfigError(format!(
                "Octopus address must use http or https, got {}",
                url.scheme()
            )));
        }

        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(ProviderError::ConfigError(format!(
                "no Octopus API key configured (set {} or octopus.api_key)",
                ENV_OCTOPUS_APIKEY
            ))),
        }
    }

    /// The API key, once `validate` has passed
    pub fn require_api_key(&self) -> Result<&SecretString, ProviderError> {
        self.api_key
            .as_ref()
            .ok_or_else(|| ProviderError::ConfigError("no Octopus API key configured".to_string()))
    }
}

impl Settings {
    /// Load settings from `file` if it exists, then apply environment overrides
    pub async fn load(file: &File) -> Result<Self, ProviderError> {
        let mut settings = if file.exists().await {
            debug!("Reading settings from {}", file.path().display());
            file.read_json::<Settings>().await?
        } else {
            Settings::default()
        };

        settings.apply_overrides(
            std::env::var(ENV_OCTOPUS_URL).ok(),
            std::env::var(ENV_OCTOPUS_APIKEY).ok(),
        );
        Ok(settings)
    }

    /// Replace the address and API key with any non-empty override
    pub fn apply_overrides(&mut self, address: Option<String>, api_key: Option<String>) {
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            self.octopus.address = address;
        }
        if let Some(api_key) = api_key.filter(|k| !k.is_empty()) {
            self.octopus.api_key = Some(SecretString::from(api_key));
        }
    }
}
