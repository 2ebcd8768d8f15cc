//! Command line options

use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::ProviderError;
use crate::filesys::file::File;
use crate::storage::layout::StorageLayout;

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print version info
    Version,

    /// Print the resource schema
    Schema,

    /// Validate a configuration block and print it with defaults applied
    Validate,

    /// Create or update the project to match configuration
    Apply,

    /// Read the project back into state
    Refresh,

    /// Delete the project
    Destroy,
}

impl Command {
    const FLAGS: [(&'static str, Command); 6] = [
        ("version", Command::Version),
        ("schema", Command::Schema),
        ("validate", Command::Validate),
        ("apply", Command::Apply),
        ("refresh", Command::Refresh),
        ("destroy", Command::Destroy),
    ];

    /// Whether the command talks to the Octopus server
    pub fn needs_client(&self) -> bool {
        matches!(self, Command::Apply | Command::Refresh | Command::Destroy)
    }
}

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub command: Command,

    /// Configuration block (JSON) for `validate` and `apply`
    pub config_file: Option<File>,

    /// Resource state file
    pub state_file: File,

    /// Provider settings file
    pub settings_file: File,
}

impl AppOptions {
    /// Build options from `--key=value` / `--flag` arguments
    pub fn from_args(args: &HashMap<String, String>) -> Result<Self, ProviderError> {
        let commands: Vec<Command> = Command::FLAGS
            .iter()
            .filter(|(flag, _)| args.contains_key(*flag))
            .map(|(_, command)| *command)
            .collect();

        let command = match commands.as_slice() {
            [command] => *command,
            [] => {
                return Err(ProviderError::ConfigError(
                    "expected one of --version, --schema, --validate, --apply, --refresh, --destroy"
                        .to_string(),
                ))
            }
            _ => {
                return Err(ProviderError::ConfigError(
                    "only one command may be given".to_string(),
                ))
            }
        };

        let layout = args
            .get("dir")
            .map(StorageLayout::new)
            .unwrap_or_default();

        let config_file = args.get("config").map(|p| File::new(PathBuf::from(p)));
        if matches!(command, Command::Validate | Command::Apply) && config_file.is_none() {
            return Err(ProviderError::ConfigError(
                "--config=FILE is required".to_string(),
            ));
        }

        Ok(Self {
            command,
            config_file,
            state_file: args
                .get("state")
                .map(File::new)
                .unwrap_or_else(|| layout.state_file()),
            settings_file: args
                .get("settings")
                .map(File::new)
                .unwrap_or_else(|| layout.settings_file()),
        })
    }
}
