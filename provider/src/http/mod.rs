//! Octopus REST API client

pub mod client;
pub mod deployment_processes;
pub mod projects;

pub use client::HttpClient;
