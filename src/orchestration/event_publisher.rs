//! # Provisioning Event Publisher
//!
//! Broadcasts provisioning lifecycle events to any number of subscribers.
//!
//! ## Usage
//!
//! ```rust
//! use scheduler_provisioning::orchestration::event_publisher::{EventPublisher, ProvisioningEvent};
//!
//! let publisher = EventPublisher::new();
//! let mut events = publisher.subscribe();
//!
//! publisher.publish(ProvisioningEvent::Closed);
//! assert_eq!(events.try_recv().unwrap().event, ProvisioningEvent::Closed);
//! ```

use super::types::{ActionKind, ActionOutcome, RemediationReport};
use crate::state_machine::RunPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Provisioning lifecycle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProvisioningEvent {
    RunStarted { run_id: Uuid },
    ApisEnabling { endpoints: Vec<String> },
    ApisEnabled,
    ActionStarted { action: ActionKind },
    ActionFinished { action: ActionKind, outcome: ActionOutcome },
    SnapshotRefreshed { project_id: String },
    SnapshotFailed { reason: String },
    RunFinished { run_id: Uuid, report: RemediationReport },
    /// The run future was dropped before it finished
    RunAbandoned { run_id: Uuid, phase: RunPhase },
    Closed,
}

impl ProvisioningEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::ApisEnabling { .. } => "apis_enabling",
            Self::ApisEnabled => "apis_enabled",
            Self::ActionStarted { .. } => "action_started",
            Self::ActionFinished { .. } => "action_finished",
            Self::SnapshotRefreshed { .. } => "snapshot_refreshed",
            Self::SnapshotFailed { .. } => "snapshot_failed",
            Self::RunFinished { .. } => "run_finished",
            Self::RunAbandoned { .. } => "run_abandoned",
            Self::Closed => "closed",
        }
    }
}

/// Event with publication metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub event: ProvisioningEvent,
    pub correlation_id: String,
    pub published_at: DateTime<Utc>,
}

/// Event publisher configuration
#[derive(Debug, Clone)]
pub struct EventPublisherConfig {
    /// Maximum number of events buffered per subscriber
    pub buffer_size: usize,
    /// Correlation ID stamped on every event
    pub correlation_id: Option<String>,
}

impl Default for EventPublisherConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            correlation_id: None,
        }
    }
}

/// Broadcast publisher for provisioning events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    event_sender: broadcast::Sender<PublishedEvent>,
    correlation_id: String,
}

impl EventPublisher {
    /// Create a new event publisher with default configuration
    pub fn new() -> Self {
        Self::with_config(EventPublisherConfig::default())
    }

    /// Create a new event publisher with custom configuration
    pub fn with_config(config: EventPublisherConfig) -> Self {
        let (event_sender, _) = broadcast::channel(config.buffer_size.max(1));
        let correlation_id = config
            .correlation_id
            .unwrap_or_else(|| format!("prov_{}", &Uuid::new_v4().simple().to_string()[..8]));

        Self {
            event_sender,
            correlation_id,
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.event_sender.subscribe()
    }

    /// Publish an event; having no subscribers is not an error
    pub fn publish(&self, event: ProvisioningEvent) {
        let event_type = event.event_type();
        let published = PublishedEvent {
            event,
            correlation_id: self.correlation_id.clone(),
            published_at: Utc::now(),
        };

        let delivered = self.event_sender.send(published).unwrap_or(0);
        debug!(
            event_type = event_type,
            correlation_id = %self.correlation_id,
            subscribers = delivered,
            "Provisioning event published"
        );
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
