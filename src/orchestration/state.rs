use super::types::ActionKind;
use crate::models::ProjectState;
use crate::state_machine::RunPhase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Progress state owned by the orchestrator
///
/// Only the orchestrator writes to it. Readers get clones through
/// [`ProvisioningOrchestrator::state`](super::ProvisioningOrchestrator::state)
/// or a watch subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorState {
    pub enabling_apis: bool,
    pub creating_bucket: bool,
    pub creating_function: bool,
    /// Most recent failure message (last write wins)
    pub error: Option<String>,
    /// Last failure message per action for the current run
    pub action_errors: BTreeMap<ActionKind, String>,
    /// Set while the most recent snapshot fetch has failed
    pub snapshot_error: Option<String>,
    /// `None` only until the first snapshot arrives
    pub project_state: Option<ProjectState>,
    pub phase: RunPhase,
    pub run_id: Option<Uuid>,
}

impl OrchestratorState {
    /// Any remediation call in flight
    pub fn operations_pending(&self) -> bool {
        self.enabling_apis || self.creating_bucket || self.creating_function
    }

    pub fn error_for(&self, action: ActionKind) -> Option<&str> {
        self.action_errors.get(&action).map(String::as_str)
    }

    pub(crate) fn set_busy(&mut self, action: ActionKind, busy: bool) {
        match action {
            ActionKind::EnableApis => self.enabling_apis = busy,
            ActionKind::CreateCloudFunction => self.creating_function = busy,
            ActionKind::CreateGcsBucket => self.creating_bucket = busy,
        }
    }

    pub(crate) fn record_failure(&mut self, action: ActionKind, message: &str) {
        self.error = Some(message.to_string());
        self.action_errors.insert(action, message.to_string());
    }

    pub(crate) fn reset_for_run(&mut self, run_id: Uuid, phase: RunPhase) {
        self.error = None;
        self.action_errors.clear();
        self.run_id = Some(run_id);
        self.phase = phase;
    }
}
