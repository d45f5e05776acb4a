use serde::{Deserialize, Serialize};

/// A cloud API the scheduler depends on
///
/// Identity is the `endpoint`; `name` and `documentation` are display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub endpoint: String,
    pub name: String,
    pub documentation: String,
}

impl Service {
    pub fn new(
        endpoint: impl Into<String>,
        name: impl Into<String>,
        documentation: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            name: name.into(),
            documentation: documentation.into(),
        }
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint
    }
}

impl Eq for Service {}

/// Enablement status of a single service within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub service: Service,
    pub enabled: bool,
}

impl ServiceStatus {
    pub fn new(service: Service, enabled: bool) -> Self {
        Self { service, enabled }
    }

    pub fn endpoint(&self) -> &str {
        &self.service.endpoint
    }
}

/// Point-in-time readiness snapshot of a project
///
/// Snapshots are immutable. The orchestrator replaces the stored snapshot
/// wholesale on every refresh and never patches individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub project_id: String,
    pub service_statuses: Vec<ServiceStatus>,
    pub has_gcs_bucket: bool,
    pub has_cloud_function: bool,
}

impl ProjectState {
    /// Endpoints whose service is not yet enabled, in snapshot order
    pub fn disabled_endpoints(&self) -> Vec<String> {
        self.service_statuses
            .iter()
            .filter(|s| !s.enabled)
            .map(|s| s.service.endpoint.clone())
            .collect()
    }

    /// True when every prerequisite is already satisfied
    pub fn is_ready(&self) -> bool {
        self.has_gcs_bucket
            && self.has_cloud_function
            && self.service_statuses.iter().all(|s| s.enabled)
    }
}
