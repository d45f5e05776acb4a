// Run phase state machine for provisioning
//
// Tracks {Idle, EnablingApis, CreatingResources, Done} and guards the
// Initialize trigger against re-entry while remote work is in flight.

pub mod errors;
pub mod events;
pub mod guards;
pub mod run_state_machine;
pub mod states;

// Re-export main types for convenient access
pub use errors::{GuardError, StateMachineError, StateMachineResult};
pub use events::RunEvent;
pub use guards::{RunNotInProgressGuard, StateGuard};
pub use run_state_machine::RunStateMachine;
pub use states::RunPhase;
