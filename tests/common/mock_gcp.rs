//! Mock cloud implementation for testing
//!
//! Implements both collaborator traits over one shared in-memory project so
//! that successful remediation calls are reflected by the next snapshot, the
//! way the live project behaves.

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use scheduler_provisioning::models::ProjectState;
use scheduler_provisioning::orchestration::{ProjectStateProvider, ProvisioningService};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Barrier, Notify};

/// A call observed by the mock, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetProjectState,
    EnableServices(Vec<String>),
    EnableServicesResolved,
    CreateCloudFunction(String),
    CreateCloudFunctionResolved,
    CreateBucket(String),
    CreateBucketResolved,
}

#[derive(Debug, Default)]
struct MockGcpState {
    project: Option<ProjectState>,
    calls: Vec<Call>,
    fail_snapshot: bool,
    fail_enable: bool,
    fail_function: bool,
    fail_bucket: bool,
    enablement_creates_bucket: bool,
}

/// Mock cloud for testing
#[derive(Default)]
pub struct MockGcp {
    state: Mutex<MockGcpState>,
    enable_delay: Option<Duration>,
    bucket_delay: Option<Duration>,
    enable_gate: Option<Arc<Notify>>,
    creation_barrier: Option<Arc<Barrier>>,
}

impl MockGcp {
    pub fn new(project: ProjectState) -> Self {
        Self {
            state: Mutex::new(MockGcpState {
                project: Some(project),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Delay before the enablement call resolves
    pub fn with_enable_delay(mut self, delay: Duration) -> Self {
        self.enable_delay = Some(delay);
        self
    }

    /// Delay before the bucket call resolves
    pub fn with_bucket_delay(mut self, delay: Duration) -> Self {
        self.bucket_delay = Some(delay);
        self
    }

    /// Enablement call waits until the gate is notified
    pub fn with_enable_gate(mut self, gate: Arc<Notify>) -> Self {
        self.enable_gate = Some(gate);
        self
    }

    /// Both creation calls must reach the barrier before either resolves
    pub fn with_creation_barrier(mut self) -> Self {
        self.creation_barrier = Some(Arc::new(Barrier::new(2)));
        self
    }

    pub fn failing_snapshot(self, fail: bool) -> Self {
        self.set_snapshot_failure(fail);
        self
    }

    pub fn failing_enable(self) -> Self {
        self.state.lock().unwrap().fail_enable = true;
        self
    }

    pub fn failing_function(self) -> Self {
        self.state.lock().unwrap().fail_function = true;
        self
    }

    pub fn failing_bucket(self) -> Self {
        self.state.lock().unwrap().fail_bucket = true;
        self
    }

    /// A successful enablement also makes a bucket appear in the project
    pub fn enablement_creates_bucket(self) -> Self {
        self.state.lock().unwrap().enablement_creates_bucket = true;
        self
    }

    pub fn set_snapshot_failure(&self, fail: bool) {
        self.state.lock().unwrap().fail_snapshot = fail;
    }

    pub fn set_enable_failure(&self, fail: bool) {
        self.state.lock().unwrap().fail_enable = fail;
    }

    /// Change the live project behind the orchestrator's back
    pub fn update_project(&self, update: impl FnOnce(&mut ProjectState)) {
        let mut state = self.state.lock().unwrap();
        if let Some(project) = state.project.as_mut() {
            update(project);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, matcher: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matcher(c)).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn enable_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::EnableServices(endpoints) => Some(endpoints),
                _ => None,
            })
            .collect()
    }

    pub fn function_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateCloudFunction(region) => Some(region),
                _ => None,
            })
            .collect()
    }

    pub fn bucket_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateBucket(project_id) => Some(project_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    async fn wait_for_sibling(&self) {
        if let Some(barrier) = &self.creation_barrier {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl ProjectStateProvider for MockGcp {
    async fn get_project_state(&self) -> anyhow::Result<ProjectState> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetProjectState);
        if state.fail_snapshot {
            return Err(anyhow!("project state request timed out"));
        }
        state
            .project
            .clone()
            .ok_or_else(|| anyhow!("no project configured"))
    }
}

#[async_trait]
impl ProvisioningService for MockGcp {
    async fn enable_services(&self, endpoints: &[String]) -> anyhow::Result<()> {
        self.record(Call::EnableServices(endpoints.to_vec()));

        if let Some(gate) = &self.enable_gate {
            gate.notified().await;
        }
        if let Some(delay) = self.enable_delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::EnableServicesResolved);
        if state.fail_enable {
            return Err(anyhow!("403: permission denied"));
        }

        let creates_bucket = state.enablement_creates_bucket;
        if let Some(project) = state.project.as_mut() {
            for status in project.service_statuses.iter_mut() {
                if endpoints.contains(&status.service.endpoint) {
                    status.enabled = true;
                }
            }
            if creates_bucket {
                project.has_gcs_bucket = true;
            }
        }
        Ok(())
    }

    async fn create_cloud_function(&self, region: &str) -> anyhow::Result<()> {
        self.record(Call::CreateCloudFunction(region.to_string()));
        self.wait_for_sibling().await;

        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateCloudFunctionResolved);
        if state.fail_function {
            return Err(anyhow!("function deployment failed"));
        }
        if let Some(project) = state.project.as_mut() {
            project.has_cloud_function = true;
        }
        Ok(())
    }

    async fn create_bucket(&self, project_id: &str) -> anyhow::Result<()> {
        self.record(Call::CreateBucket(project_id.to_string()));
        self.wait_for_sibling().await;
        if let Some(delay) = self.bucket_delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateBucketResolved);
        if state.fail_bucket {
            return Err(anyhow!("bucket name already taken"));
        }
        if let Some(project) = state.project.as_mut() {
            project.has_gcs_bucket = true;
        }
        Ok(())
    }
}
