#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Scheduler Provisioning
//!
//! Provisioning orchestration core for the notebook scheduler.
//!
//! ## Overview
//!
//! Before notebook runs can be scheduled, a project needs a set of cloud APIs
//! enabled, a storage bucket and a deployed Cloud Function. This crate takes a
//! readiness snapshot of the project, decides what is missing and performs the
//! remediation:
//!
//! - API enablement runs first, as one batched call
//! - bucket and function creation run concurrently once APIs are enabled
//! - every phase refreshes the snapshot when it finishes
//! - failures are recorded per action and never abort sibling work
//!
//! Rendering is left to the embedding panel, which reads
//! [`OrchestratorState`] (or a [`presentation::ProgressView`] built from it)
//! and triggers [`ProvisioningOrchestrator::initialize`].
//!
//! ## Module Organization
//!
//! - [`models`] - Project readiness snapshot types
//! - [`readiness`] - Snapshot classification
//! - [`state_machine`] - Run phase tracking and re-entrancy guard
//! - [`orchestration`] - Collaborator traits and the orchestrator
//! - [`presentation`] - Read-only progress view
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging bootstrap
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scheduler_provisioning::config::ProvisioningConfig;
//! use scheduler_provisioning::orchestration::{
//!     ProjectStateProvider, ProvisioningOrchestrator, ProvisioningService,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     provider: Arc<dyn ProjectStateProvider>,
//! #     service: Arc<dyn ProvisioningService>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = ProvisioningOrchestrator::new(provider, service, ProvisioningConfig::default());
//! orchestrator.start().await?;
//!
//! let report = orchestrator.initialize().await?;
//! for (action, message) in report.failures() {
//!     eprintln!("{action}: {message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod presentation;
pub mod readiness;
pub mod state_machine;

pub use config::{ConfigManager, ConfigurationError, ProvisioningConfig};
pub use constants::DEFAULT_REGION;
pub use error::{ProvisioningError, Result};
pub use models::{ProjectState, Service, ServiceStatus};
pub use orchestration::{
    ActionKind, ActionOutcome, OrchestratorState, ProjectStateProvider, ProvisioningOrchestrator,
    ProvisioningService, RemediationReport,
};
pub use readiness::ReadinessReport;
pub use state_machine::{RunEvent, RunPhase};
