use super::{
    errors::{StateMachineError, StateMachineResult},
    events::RunEvent,
    guards::{RunNotInProgressGuard, StateGuard},
    states::RunPhase,
};
use tracing::debug;
use uuid::Uuid;

/// Phase tracker for provisioning runs
///
/// Owned by the orchestrator and only ever mutated under its state lock, so a
/// guard check and the transition that follows it happen atomically.
#[derive(Debug, Clone, Default)]
pub struct RunStateMachine {
    current_state: RunPhase,
    run_id: Option<Uuid>,
}

impl RunStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> RunPhase {
        self.current_state
    }

    /// Identifier of the run currently in flight, or of the last one started
    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    /// Start a new run with its first event
    ///
    /// Rejects the trigger unless the machine is `Idle` or `Done`.
    pub fn begin(&mut self, run_id: Uuid, first: RunEvent) -> StateMachineResult<RunPhase> {
        RunNotInProgressGuard.check(self.current_state)?;
        let target = self.transition(first)?;
        self.run_id = Some(run_id);
        Ok(target)
    }

    /// Apply an event to the current phase
    pub fn transition(&mut self, event: RunEvent) -> StateMachineResult<RunPhase> {
        let target = Self::determine_target_state(self.current_state, &event)?;
        debug!(
            from = %self.current_state,
            to = %target,
            event = event.event_type(),
            "Run phase transition"
        );
        self.current_state = target;
        Ok(target)
    }

    /// Determine the target phase for an event without applying it
    pub fn determine_target_state(
        current_state: RunPhase,
        event: &RunEvent,
    ) -> StateMachineResult<RunPhase> {
        use RunEvent::*;
        use RunPhase::*;

        let target = match (current_state, event) {
            (Idle | Done, EnableApis) => EnablingApis,
            (Idle | Done | EnablingApis, CreateResources) => CreatingResources,
            (_, Complete) => Done,
            (EnablingApis | CreatingResources, Fail(_)) => Idle,
            (from, event) => {
                return Err(StateMachineError::InvalidTransition {
                    from,
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
