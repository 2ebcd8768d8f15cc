//! Error types for the provider

use thiserror::Error;

use crate::schema::Diagnostic;

/// Main error type for the provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Octopus API error: {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", join_diagnostics(.0))]
    ValidationError(Vec<Diagnostic>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("State error: {0}")]
    StateError(String),

    /// A remote call failure prefixed with the operation that was running
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ProviderError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Wrap this error with an operation-specific prefix
    pub fn context(self, context: impl Into<String>) -> Self {
        ProviderError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error, or the error it wraps, is the remote not-found signal
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::NotFound(_) => true,
            ProviderError::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extension for attaching operation context to results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, ProviderError>;

    fn with_context<F, S>(self, f: F) -> Result<T, ProviderError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T, ProviderError> {
    fn context(self, context: impl Into<String>) -> Result<T, ProviderError> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F, S>(self, f: F) -> Result<T, ProviderError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}
