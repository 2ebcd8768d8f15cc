pub mod project;
pub mod step;

pub use project::{FailureMode, ProjectConfig, SkipMachineBehavior};
pub use step::{DeploymentStep, IisWebsiteStep, StepCommon, StepKind, WindowsServiceStep};
