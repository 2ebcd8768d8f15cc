//! Resource operations over HTTP

use octoform::api::ProjectApi;
use octoform::errors::ProviderError;
use octoform::models::project::{FailureMode, ProjectConfig};
use octoform::resource::{create, delete, read, update, ResourceState};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use crate::fake_server::FakeServer;

fn funky_monkey() -> ProjectConfig {
    ProjectConfig::from_raw(json!({
        "name": "Funky Monkey",
        "lifecycle_id": "Lifecycles-1",
        "project_group_id": "ProjectGroups-1",
        "description": "My Awesome Description",
        "deployment_step_windows_service": [{
            "executable_path": "batch_processor\\batch_processor_service.exe",
            "service_name": "Billing Batch Processor",
            "step_name": "Deploy Billing Batch Processor Windows Service",
            "target_roles": ["Billing-Batch-Processor"]
        }],
        "deployment_step_iis_website": [{
            "website_name": "Billing",
            "application_pool_name": "Billing",
            "step_name": "Deploy Billing Web Site",
            "target_roles": ["Billing-Web"]
        }]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_create_read_round_trip() {
    let server = FakeServer::start().await;
    let client = server.client();
    let mut state = ResourceState::new(funky_monkey());

    assert_ok!(create(&client, &mut state).await);
    assert_eq!(state.id(), Some("Projects-1"));
    assert_eq!(
        state.config.deployment_process_id.as_deref(),
        Some("deploymentprocess-Projects-1")
    );

    let project = server.project("Projects-1").unwrap();
    assert_eq!(project.name, "Funky Monkey");
    assert_eq!(project.description, "My Awesome Description");
    assert_eq!(
        project.default_guided_failure_mode.as_deref(),
        Some("EnvironmentDefault")
    );

    let process = server.process("deploymentprocess-Projects-1").unwrap();
    assert_eq!(process.version, Some(1));
    assert_eq!(process.steps.len(), 2);
    assert_eq!(
        process.steps[0].properties.get("Octopus.Action.TargetRoles").unwrap(),
        "Billing-Batch-Processor"
    );

    let mut refreshed = ResourceState::new(ProjectConfig::new("", "", ""));
    refreshed.set_id("Projects-1");
    assert_ok!(read(&client, &mut refreshed).await);
    assert_eq!(refreshed.config.name, "Funky Monkey");
    assert_eq!(refreshed.config.lifecycle_id, "Lifecycles-1");
    assert_eq!(refreshed.config.project_group_id, "ProjectGroups-1");
    assert_eq!(refreshed.config.description, "My Awesome Description");
}

#[tokio::test]
async fn test_update_removes_description_and_steps() {
    let server = FakeServer::start().await;
    let client = server.client();
    let mut state = ResourceState::new(funky_monkey());
    assert_ok!(create(&client, &mut state).await);

    let process_id = state.config.deployment_process_id.clone();
    let mut config = ProjectConfig::new("Funky Monkey", "Lifecycles-1", "ProjectGroups-1");
    config.default_failure_mode = FailureMode::Off;
    config.deployment_process_id = process_id;
    state.config = config;

    assert_ok!(update(&client, &mut state).await);

    let project = server.project("Projects-1").unwrap();
    assert_eq!(project.description, "");
    assert_eq!(project.default_guided_failure_mode.as_deref(), Some("Off"));

    // the server answers with "Description": null
    state.config.description = "stale".to_string();
    assert_ok!(read(&client, &mut state).await);
    assert_eq!(state.config.description, "");

    let process = server.process("deploymentprocess-Projects-1").unwrap();
    assert_eq!(process.version, Some(2));
    assert!(process.steps.is_empty());
}

#[tokio::test]
async fn test_delete_then_read_clears_id() {
    let server = FakeServer::start().await;
    let client = server.client();
    let mut state = ResourceState::new(funky_monkey());
    assert_ok!(create(&client, &mut state).await);

    // a second handle on the same project, as a later run would have
    let mut stale = state.clone();

    assert_ok!(delete(&client, &mut state).await);
    assert!(server.project("Projects-1").is_none());

    assert_ok!(read(&client, &mut stale).await);
    assert_eq!(stale.id(), None);
}

#[tokio::test]
async fn test_duplicate_name_reports_server_errors() {
    let server = FakeServer::start().await;
    let client = server.client();
    let mut first = ResourceState::new(funky_monkey());
    assert_ok!(create(&client, &mut first).await);

    let mut second = ResourceState::new(funky_monkey());
    let err = assert_err!(create(&client, &mut second).await);

    assert_eq!(
        err.to_string(),
        "error creating project: Octopus API error: 400: \
         There was a problem with your request. (Name must be unique)"
    );
    assert_eq!(second.id(), None);
}

#[tokio::test]
async fn test_failed_process_update_keeps_project() {
    let server = FakeServer::start().await;
    server.data.lock().unwrap().reject_process_updates = true;
    let client = server.client();
    let mut state = ResourceState::new(funky_monkey());

    let err = assert_err!(create(&client, &mut state).await);

    assert!(err
        .to_string()
        .starts_with("error creating deploymentprocess: error creating deployment process for project: "));
    assert_eq!(state.id(), Some("Projects-1"));
    assert!(server.project("Projects-1").is_some());
}

#[tokio::test]
async fn test_wrong_api_key_is_api_error() {
    let server = FakeServer::start().await;
    let client = server.client_with_key("API-WRONG");

    let err = assert_err!(client.get_project("Projects-1").await);

    match err {
        ProviderError::ApiError { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "You must be logged in to perform this action.");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let server = FakeServer::start().await;
    let client = server.client();

    let err = assert_err!(client.get_project("Projects-42").await);

    assert!(err.is_not_found());
}
