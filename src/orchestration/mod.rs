//! # Provisioning Orchestration
//!
//! Decides which remediation work a readiness snapshot calls for, runs it in
//! the required order and surfaces partial failure.
//!
//! ## Core Components
//!
//! - **ProvisioningOrchestrator**: the run sequencer and snapshot refresher
//! - **OrchestratorState**: progress flags, errors and the latest snapshot
//! - **EventPublisher**: broadcast of provisioning lifecycle events
//! - **ProjectStateProvider / ProvisioningService**: external collaborators

pub mod event_publisher;
pub mod orchestrator;
pub mod state;
pub mod types;

pub use event_publisher::{EventPublisher, EventPublisherConfig, ProvisioningEvent, PublishedEvent};
pub use orchestrator::ProvisioningOrchestrator;
pub use state::OrchestratorState;
pub use types::{
    ActionKind, ActionOutcome, ProjectStateProvider, ProvisioningService, RemediationReport,
};
