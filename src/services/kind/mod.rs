//! Local kind cluster service
//!
//! Handles the container engine check, kind/kubectl installation, cluster
//! creation and node readiness for the Keel development cluster.

// Module declarations
pub mod cluster;
pub mod engine;
pub mod instructions;
pub mod tools;
pub mod verify;

// Re-export tool installation functions
pub use tools::{check_and_install_kind, check_and_install_kubectl};

// Re-export public functions from modules
pub use cluster::{ClusterOutcome, delete_cluster, ensure_cluster};
pub use engine::check_container_engine;
pub use instructions::print_instructions;
pub use verify::verify_cluster;
