//! Test data builders for project snapshots and orchestrators

#![allow(dead_code)]

use super::mock_gcp::MockGcp;
use scheduler_provisioning::config::ProvisioningConfig;
use scheduler_provisioning::models::{ProjectState, Service, ServiceStatus};
use scheduler_provisioning::orchestration::ProvisioningOrchestrator;
use std::sync::Arc;

pub const PROJECT_ID: &str = "notebooks-test-project";

/// Builder pattern for creating test ProjectStates
pub struct ProjectStateBuilder {
    project_id: String,
    services: Vec<ServiceStatus>,
    has_gcs_bucket: bool,
    has_cloud_function: bool,
}

impl ProjectStateBuilder {
    pub fn new() -> Self {
        Self {
            project_id: PROJECT_ID.to_string(),
            services: Vec::new(),
            has_gcs_bucket: false,
            has_cloud_function: false,
        }
    }

    pub fn with_service(mut self, endpoint: &str, enabled: bool) -> Self {
        let name = endpoint.split('.').next().unwrap_or(endpoint).to_string();
        self.services.push(ServiceStatus::new(
            Service::new(endpoint, name, format!("https://cloud.google.com/{endpoint}")),
            enabled,
        ));
        self
    }

    pub fn with_bucket(mut self) -> Self {
        self.has_gcs_bucket = true;
        self
    }

    pub fn with_function(mut self) -> Self {
        self.has_cloud_function = true;
        self
    }

    pub fn build(self) -> ProjectState {
        ProjectState {
            project_id: self.project_id,
            service_statuses: self.services,
            has_gcs_bucket: self.has_gcs_bucket,
            has_cloud_function: self.has_cloud_function,
        }
    }
}

impl Default for ProjectStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator wired to one mock for both collaborators
pub fn orchestrator_for(mock: &Arc<MockGcp>) -> ProvisioningOrchestrator {
    ProvisioningOrchestrator::new(mock.clone(), mock.clone(), ProvisioningConfig::default())
}

/// Orchestrator that has already loaded its first snapshot
pub async fn started_orchestrator(mock: &Arc<MockGcp>) -> ProvisioningOrchestrator {
    let orchestrator = orchestrator_for(mock);
    orchestrator
        .start()
        .await
        .expect("initial snapshot should load");
    orchestrator
}
