use crate::config::ConfigurationError;
use crate::state_machine::{GuardError, RunPhase, StateMachineError};
use thiserror::Error;

/// Errors surfaced by the provisioning orchestrator to its caller
///
/// Failures of the remote remediation calls are not in this list. Those are
/// recorded in the orchestrator state as fixed messages and never propagate.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("Provisioning run already in progress (phase: {phase})")]
    RunInProgress { phase: RunPhase },

    #[error("Project state unavailable: {reason}")]
    SnapshotUnavailable { reason: String },

    #[error("State transition error: {0}")]
    StateTransition(StateMachineError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl From<StateMachineError> for ProvisioningError {
    fn from(err: StateMachineError) -> Self {
        match err {
            StateMachineError::GuardFailed(GuardError::RunInProgress { phase }) => {
                Self::RunInProgress { phase }
            }
            other => Self::StateTransition(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisioningError>;
