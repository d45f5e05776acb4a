//! # Models
//!
//! Readiness snapshot types returned by the project state provider.

pub mod project_state;

pub use project_state::{ProjectState, Service, ServiceStatus};
