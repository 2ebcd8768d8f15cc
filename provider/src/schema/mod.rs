//! Resource schema: attribute metadata, validation and the project block

pub mod attribute;
pub mod project;
pub mod validate;

use std::fmt;

use serde::Serialize;

pub use attribute::{Attribute, AttributeType, Block};
pub use project::{project_schema, schema_json, RESOURCE_NAME};
pub use validate::validate;

/// A single validation problem, located by attribute path (`steps.0.name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
