//! # Readiness Classification
//!
//! Splits a snapshot into the three independent prerequisite facts the
//! remediation sequencer acts on.

use crate::models::ProjectState;
use serde::{Deserialize, Serialize};

/// Prerequisite facts derived from one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// Disabled endpoints, in the order the snapshot lists them
    pub to_enable: Vec<String>,
    pub has_bucket: bool,
    pub has_function: bool,
}

impl ReadinessReport {
    pub fn classify(snapshot: &ProjectState) -> Self {
        Self {
            to_enable: snapshot.disabled_endpoints(),
            has_bucket: snapshot.has_gcs_bucket,
            has_function: snapshot.has_cloud_function,
        }
    }

    pub fn needs_api_enablement(&self) -> bool {
        !self.to_enable.is_empty()
    }

    pub fn needs_bucket(&self) -> bool {
        !self.has_bucket
    }

    pub fn needs_function(&self) -> bool {
        !self.has_function
    }

    /// Nothing left to remediate
    pub fn is_satisfied(&self) -> bool {
        !self.needs_api_enablement() && !self.needs_bucket() && !self.needs_function()
    }
}

impl From<&ProjectState> for ReadinessReport {
    fn from(snapshot: &ProjectState) -> Self {
        Self::classify(snapshot)
    }
}
