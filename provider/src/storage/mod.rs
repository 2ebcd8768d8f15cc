//! On-disk settings and resource state

pub mod layout;
pub mod settings;
pub mod state;
