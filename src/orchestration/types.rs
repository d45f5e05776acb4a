//! # Orchestration Types
//!
//! Collaborator contracts and the per-action result types shared across the
//! provisioning orchestrator.

use crate::constants::messages;
use crate::models::ProjectState;
use crate::state_machine::RunPhase;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Source of live project readiness snapshots
///
/// Implementations are expected to hit the network and may be slow or fail.
#[async_trait]
pub trait ProjectStateProvider: Send + Sync {
    async fn get_project_state(&self) -> anyhow::Result<ProjectState>;
}

/// Remote provisioning calls
///
/// Errors are opaque; the orchestrator only looks at whether a call failed.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Enable all endpoints in one batched request (all-or-nothing)
    async fn enable_services(&self, endpoints: &[String]) -> anyhow::Result<()>;

    /// Deploy the scheduler's Cloud Function in `region`
    async fn create_cloud_function(&self, region: &str) -> anyhow::Result<()>;

    /// Create the scheduler's storage bucket for `project_id`
    async fn create_bucket(&self, project_id: &str) -> anyhow::Result<()>;
}

/// Identity of a remediation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EnableApis,
    CreateCloudFunction,
    CreateGcsBucket,
}

impl ActionKind {
    /// Fixed user-facing message recorded when this action fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::EnableApis => messages::ENABLE_APIS_FAILED,
            Self::CreateCloudFunction => messages::CREATE_FUNCTION_FAILED,
            Self::CreateGcsBucket => messages::CREATE_BUCKET_FAILED,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableApis => write!(f, "enable_apis"),
            Self::CreateCloudFunction => write!(f, "create_cloud_function"),
            Self::CreateGcsBucket => write!(f, "create_gcs_bucket"),
        }
    }
}

/// Terminal outcome of one remediation action within a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Not needed, or not attempted because an earlier phase failed
    #[default]
    Skipped,
    Succeeded,
    Failed(String),
}

impl ActionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn was_attempted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Result of one Initialize run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationReport {
    pub run_id: Uuid,
    pub enable_apis: ActionOutcome,
    pub cloud_function: ActionOutcome,
    pub gcs_bucket: ActionOutcome,
    pub final_phase: RunPhase,
}

impl RemediationReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            enable_apis: ActionOutcome::Skipped,
            cloud_function: ActionOutcome::Skipped,
            gcs_bucket: ActionOutcome::Skipped,
            final_phase: RunPhase::Idle,
        }
    }

    pub fn outcome(&self, action: ActionKind) -> &ActionOutcome {
        match action {
            ActionKind::EnableApis => &self.enable_apis,
            ActionKind::CreateCloudFunction => &self.cloud_function,
            ActionKind::CreateGcsBucket => &self.gcs_bucket,
        }
    }

    /// Failed actions with their messages, in execution order
    pub fn failures(&self) -> Vec<(ActionKind, &str)> {
        [
            ActionKind::EnableApis,
            ActionKind::CreateCloudFunction,
            ActionKind::CreateGcsBucket,
        ]
        .into_iter()
        .filter_map(|kind| self.outcome(kind).error_message().map(|msg| (kind, msg)))
        .collect()
    }

    pub fn is_success(&self) -> bool {
        self.failures().is_empty()
    }

    /// True when the run had nothing to remediate
    pub fn was_noop(&self) -> bool {
        !self.enable_apis.was_attempted()
            && !self.cloud_function.was_attempted()
            && !self.gcs_bucket.was_attempted()
    }
}
