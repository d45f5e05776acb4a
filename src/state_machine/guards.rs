use super::errors::{GuardError, GuardResult};
use super::states::RunPhase;

/// Trait for implementing run transition guards
pub trait StateGuard {
    /// Check if the guarded transition is allowed from `phase`
    fn check(&self, phase: RunPhase) -> GuardResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard that rejects a new Initialize trigger while a run is in flight
pub struct RunNotInProgressGuard;

impl StateGuard for RunNotInProgressGuard {
    fn check(&self, phase: RunPhase) -> GuardResult<()> {
        if phase.accepts_trigger() {
            Ok(())
        } else {
            Err(GuardError::RunInProgress { phase })
        }
    }

    fn description(&self) -> &'static str {
        "Provisioning run must not already be in progress"
    }
}
