//! Octoform
//!
//! Declarative management of Octopus Deploy projects and their deployment
//! processes.

pub mod api;
pub mod app;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod resource;
pub mod schema;
pub mod storage;
pub mod utils;
