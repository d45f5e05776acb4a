//! # Provisioning Orchestrator
//!
//! Drives one project from a readiness snapshot to a fully provisioned
//! scheduler: enable missing APIs, then create the bucket and the Cloud
//! Function concurrently.
//!
//! ## Phases
//!
//! 1. **Enable APIs**: a single batched call for every disabled endpoint.
//!    Failure ends the run; no resource is created.
//! 2. **Create resources**: bucket and function creation run concurrently.
//!    Each owns its busy flag, records its own failure and refreshes the
//!    snapshot on completion without waiting for the other. The run joins
//!    both before reporting.
//!
//! Every phase refreshes the snapshot when it finishes, on success and on
//! failure, so readers always see the live project rather than a guess.
//!
//! A run whose future is dropped before it finishes (timeout, `select!`,
//! panel teardown) is abandoned: the phase returns to `Idle` and every busy
//! flag is cleared, so the next Initialize is accepted.

use super::event_publisher::{EventPublisher, EventPublisherConfig, ProvisioningEvent, PublishedEvent};
use super::state::OrchestratorState;
use super::types::{
    ActionKind, ActionOutcome, ProjectStateProvider, ProvisioningService, RemediationReport,
};
use crate::config::ProvisioningConfig;
use crate::constants::messages;
use crate::error::{ProvisioningError, Result};
use crate::models::ProjectState;
use crate::readiness::ReadinessReport;
use crate::state_machine::{RunEvent, RunPhase, RunStateMachine};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Orchestrates API enablement and resource creation for one project
pub struct ProvisioningOrchestrator {
    provider: Arc<dyn ProjectStateProvider>,
    service: Arc<dyn ProvisioningService>,
    config: ProvisioningConfig,
    machine: Mutex<RunStateMachine>,
    state: watch::Sender<OrchestratorState>,
    events: EventPublisher,
}

impl std::fmt::Debug for ProvisioningOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningOrchestrator")
            .field("config", &self.config)
            .field("phase", &self.machine.lock().current_state())
            .field("correlation_id", &self.events.correlation_id())
            .finish_non_exhaustive()
    }
}

impl ProvisioningOrchestrator {
    pub fn new(
        provider: Arc<dyn ProjectStateProvider>,
        service: Arc<dyn ProvisioningService>,
        config: ProvisioningConfig,
    ) -> Self {
        let events = EventPublisher::with_config(EventPublisherConfig {
            buffer_size: config.event_buffer_size,
            correlation_id: None,
        });
        let (state, _) = watch::channel(OrchestratorState::default());

        Self {
            provider,
            service,
            config,
            machine: Mutex::new(RunStateMachine::new()),
            state,
            events,
        }
    }

    /// Mount hook: fetch the first snapshot when configured to
    pub async fn start(&self) -> Result<()> {
        if self.config.refresh_on_start {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Clone of the current progress state
    pub fn state(&self) -> OrchestratorState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state mutation
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PublishedEvent> {
        self.events.subscribe()
    }

    pub fn phase(&self) -> RunPhase {
        self.machine.lock().current_state()
    }

    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// Close signal from the presentation layer
    ///
    /// In-flight work is not aborted.
    pub fn close(&self) {
        info!(phase = %self.phase(), "Provisioning panel closed");
        self.events.publish(ProvisioningEvent::Closed);
    }

    /// Fetch a new snapshot and replace the stored one
    ///
    /// On failure the previous snapshot stays in place and `snapshot_error`
    /// is set.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<ProjectState> {
        match self.provider.get_project_state().await {
            Ok(snapshot) => {
                let project_id = snapshot.project_id.clone();
                let stored = snapshot.clone();
                self.state.send_modify(|s| {
                    s.project_state = Some(stored);
                    s.snapshot_error = None;
                });
                self.events
                    .publish(ProvisioningEvent::SnapshotRefreshed { project_id });
                Ok(snapshot)
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch project state");
                self.state
                    .send_modify(|s| s.snapshot_error = Some(messages::SNAPSHOT_FAILED.to_string()));
                self.events.publish(ProvisioningEvent::SnapshotFailed {
                    reason: format!("{e:#}"),
                });
                Err(ProvisioningError::SnapshotUnavailable {
                    reason: format!("{e:#}"),
                })
            }
        }
    }

    /// Run every remediation the current snapshot calls for
    ///
    /// Rejected with [`ProvisioningError::RunInProgress`] while a previous run
    /// is still in flight. Remote call failures do not make this return an
    /// error; they are recorded in the state and in the returned report.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<RemediationReport> {
        let trigger_snapshot = match self.current_snapshot() {
            Some(snapshot) => snapshot,
            None => self.refresh().await?,
        };
        let readiness = ReadinessReport::classify(&trigger_snapshot);

        let first = if readiness.needs_api_enablement() {
            RunEvent::EnableApis
        } else if readiness.needs_bucket() || readiness.needs_function() {
            RunEvent::CreateResources
        } else {
            RunEvent::Complete
        };

        let run_id = Uuid::new_v4();
        self.begin_run(run_id, first)?;
        let run_guard = RunGuard::new(self, run_id);
        info!(%run_id, to_enable = readiness.to_enable.len(), "Provisioning run started");
        self.events.publish(ProvisioningEvent::RunStarted { run_id });

        let mut report = RemediationReport::new(run_id);

        // Services must be enabled before the bucket and function can be created
        let mut eligibility_snapshot = trigger_snapshot;
        if readiness.needs_api_enablement() {
            let (outcome, refreshed) = self.enable_apis(&readiness.to_enable).await;
            report.enable_apis = outcome;

            if let Some(message) = report.enable_apis.error_message() {
                let event = RunEvent::fail_with_error(message);
                report.final_phase = self.advance(event)?;
                return Ok(self.finish_run(run_guard, report));
            }

            if let Some(fresh) = refreshed {
                eligibility_snapshot = fresh;
            }
        }

        let eligibility = ReadinessReport::classify(&eligibility_snapshot);
        if eligibility.needs_bucket() || eligibility.needs_function() {
            if self.phase() != RunPhase::CreatingResources {
                self.advance(RunEvent::CreateResources)?;
            }

            let project_id = eligibility_snapshot.project_id.as_str();
            let function = async {
                if eligibility.needs_function() {
                    self.create_cloud_function().await
                } else {
                    ActionOutcome::Skipped
                }
            };
            let bucket = async {
                if eligibility.needs_bucket() {
                    self.create_bucket(project_id).await
                } else {
                    ActionOutcome::Skipped
                }
            };

            let (function_outcome, bucket_outcome) = tokio::join!(function, bucket);
            report.cloud_function = function_outcome;
            report.gcs_bucket = bucket_outcome;
        }

        let last_failure = report.failures().last().map(|(_, msg)| msg.to_string());
        report.final_phase = match last_failure {
            Some(message) => self.advance(RunEvent::Fail(message))?,
            None if self.phase() == RunPhase::Done => RunPhase::Done,
            None => self.advance(RunEvent::Complete)?,
        };

        Ok(self.finish_run(run_guard, report))
    }

    async fn enable_apis(&self, endpoints: &[String]) -> (ActionOutcome, Option<ProjectState>) {
        let action = ActionKind::EnableApis;
        self.state.send_modify(|s| s.set_busy(action, true));
        self.events.publish(ProvisioningEvent::ActionStarted { action });
        self.events.publish(ProvisioningEvent::ApisEnabling {
            endpoints: endpoints.to_vec(),
        });

        let outcome = match self.service.enable_services(endpoints).await {
            Ok(()) => {
                info!(count = endpoints.len(), "Enabled GCP APIs");
                self.events.publish(ProvisioningEvent::ApisEnabled);
                ActionOutcome::Succeeded
            }
            Err(e) => {
                warn!(error = %e, ?endpoints, "API enablement failed");
                self.record_failure(action)
            }
        };

        self.state.send_modify(|s| s.set_busy(action, false));
        self.events.publish(ProvisioningEvent::ActionFinished {
            action,
            outcome: outcome.clone(),
        });
        let refreshed = self.refresh().await.ok();
        (outcome, refreshed)
    }

    async fn create_cloud_function(&self) -> ActionOutcome {
        let region = self.config.region.as_str();
        self.run_action(
            ActionKind::CreateCloudFunction,
            self.service.create_cloud_function(region),
        )
        .await
    }

    async fn create_bucket(&self, project_id: &str) -> ActionOutcome {
        self.run_action(
            ActionKind::CreateGcsBucket,
            self.service.create_bucket(project_id),
        )
        .await
    }

    /// Busy flag, remote call, failure bookkeeping, refresh
    async fn run_action<Fut>(&self, action: ActionKind, call: Fut) -> ActionOutcome
    where
        Fut: Future<Output = anyhow::Result<()>>,
    {
        self.state.send_modify(|s| s.set_busy(action, true));
        self.events.publish(ProvisioningEvent::ActionStarted { action });

        let outcome = match call.await {
            Ok(()) => {
                info!(%action, "Provisioning action succeeded");
                ActionOutcome::Succeeded
            }
            Err(e) => {
                warn!(%action, error = %e, "Provisioning action failed");
                self.record_failure(action)
            }
        };

        self.state.send_modify(|s| s.set_busy(action, false));
        self.events.publish(ProvisioningEvent::ActionFinished {
            action,
            outcome: outcome.clone(),
        });
        // Failure here is already recorded as snapshot_error
        let _ = self.refresh().await;
        outcome
    }

    fn record_failure(&self, action: ActionKind) -> ActionOutcome {
        let message = action.failure_message();
        self.state.send_modify(|s| s.record_failure(action, message));
        ActionOutcome::Failed(message.to_string())
    }

    fn current_snapshot(&self) -> Option<ProjectState> {
        self.state.borrow().project_state.clone()
    }

    fn begin_run(&self, run_id: Uuid, first: RunEvent) -> Result<()> {
        let mut machine = self.machine.lock();
        let phase = machine.begin(run_id, first).map_err(|e| {
            warn!(error = %e, "Initialize rejected");
            ProvisioningError::from(e)
        })?;
        self.state.send_modify(|s| s.reset_for_run(run_id, phase));
        Ok(())
    }

    fn advance(&self, event: RunEvent) -> Result<RunPhase> {
        let mut machine = self.machine.lock();
        let phase = machine.transition(event)?;
        self.state.send_modify(|s| s.phase = phase);
        Ok(phase)
    }

    fn finish_run(
        &self,
        run_guard: RunGuard<'_>,
        report: RemediationReport,
    ) -> RemediationReport {
        run_guard.disarm();
        info!(
            run_id = %report.run_id,
            final_phase = %report.final_phase,
            failures = report.failures().len(),
            "Provisioning run finished"
        );
        self.events.publish(ProvisioningEvent::RunFinished {
            run_id: report.run_id,
            report: report.clone(),
        });
        report
    }

    /// Return an unfinished run to `Idle` and clear every busy flag
    fn abandon_run(&self, run_id: Uuid) {
        let mut machine = self.machine.lock();
        let phase = machine.current_state();
        if machine.run_id() != Some(run_id) || !phase.is_active() {
            return;
        }

        let idle = match machine.transition(RunEvent::fail_with_error("run abandoned")) {
            Ok(idle) => idle,
            Err(e) => {
                error!(%run_id, error = %e, "Failed to reset abandoned run");
                return;
            }
        };
        drop(machine);

        warn!(%run_id, %phase, "Provisioning run dropped before finishing");
        self.state.send_modify(|s| {
            s.enabling_apis = false;
            s.creating_bucket = false;
            s.creating_function = false;
            s.phase = idle;
        });
        self.events.publish(ProvisioningEvent::RunAbandoned { run_id, phase });
    }
}

/// Held for the lifetime of a claimed run
///
/// Dropping it without [`RunGuard::disarm`] abandons the run.
struct RunGuard<'a> {
    orchestrator: &'a ProvisioningOrchestrator,
    run_id: Uuid,
    armed: bool,
}

impl<'a> RunGuard<'a> {
    fn new(orchestrator: &'a ProvisioningOrchestrator, run_id: Uuid) -> Self {
        Self {
            orchestrator,
            run_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.orchestrator.abandon_run(self.run_id);
        }
    }
}
