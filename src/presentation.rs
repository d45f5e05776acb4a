//! # Progress View
//!
//! Read-only view model a provisioning panel renders from. It carries no
//! layout or styling, only what to show.

use crate::constants::{labels, notices};
use crate::orchestration::OrchestratorState;
use serde::{Deserialize, Serialize};

/// One prerequisite row of the checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub label: String,
    /// Documentation link, present for service rows
    pub link: Option<String>,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    /// No snapshot has arrived yet
    pub loading: bool,
    pub checklist: Vec<ChecklistItem>,
    pub operations_pending: bool,
    /// Notices for the calls currently in flight
    pub pending_notices: Vec<String>,
    pub error: Option<String>,
    pub can_initialize: bool,
}

impl ProgressView {
    pub fn from_state(state: &OrchestratorState) -> Self {
        let checklist = state
            .project_state
            .as_ref()
            .map(|snapshot| {
                let mut rows: Vec<ChecklistItem> = snapshot
                    .service_statuses
                    .iter()
                    .map(|s| ChecklistItem {
                        label: s.service.name.clone(),
                        link: Some(s.service.documentation.clone()),
                        satisfied: s.enabled,
                    })
                    .collect();
                rows.push(ChecklistItem {
                    label: labels::HAS_BUCKET.to_string(),
                    link: None,
                    satisfied: snapshot.has_gcs_bucket,
                });
                rows.push(ChecklistItem {
                    label: labels::HAS_FUNCTION.to_string(),
                    link: None,
                    satisfied: snapshot.has_cloud_function,
                });
                rows
            })
            .unwrap_or_default();

        let mut pending_notices = Vec::new();
        if state.enabling_apis {
            pending_notices.push(notices::ENABLING_APIS.to_string());
        }
        if state.creating_bucket {
            pending_notices.push(notices::CREATING_BUCKET.to_string());
        }
        if state.creating_function {
            pending_notices.push(notices::CREATING_FUNCTION.to_string());
        }

        let operations_pending = state.operations_pending();
        let loading = state.project_state.is_none();

        Self {
            loading,
            checklist,
            operations_pending,
            pending_notices,
            error: state.error.clone().or_else(|| state.snapshot_error.clone()),
            can_initialize: !loading && !operations_pending && state.phase.accepts_trigger(),
        }
    }

    /// Status line shown before the first snapshot arrives
    pub fn loading_notice(&self) -> Option<&'static str> {
        self.loading.then_some(notices::VALIDATING)
    }
}

impl From<&OrchestratorState> for ProgressView {
    fn from(state: &OrchestratorState) -> Self {
        Self::from_state(state)
    }
}
