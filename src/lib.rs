//! Local Kubernetes (kind) cluster provisioning for Keel development.

pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod provision;
pub mod services;

pub use config::DevConfig;
pub use error::exit_code;
