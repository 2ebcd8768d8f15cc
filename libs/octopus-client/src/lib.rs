//! Octopus Deploy REST API models
//!
//! Wire types for the project and deployment process endpoints. Field names
//! follow the server's PascalCase JSON convention.

pub mod models;

pub use models::{
    DeploymentAction, DeploymentProcess, DeploymentStep, ErrorResponse, Project,
    ProjectConnectivityPolicy, PropertyBag,
};
