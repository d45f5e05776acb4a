#![allow(dead_code)]

use proptest::prelude::*;
use scheduler_provisioning::models::{ProjectState, Service, ServiceStatus};

/// Strategy for generating API endpoint names
pub fn endpoint_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,12}\\.googleapis\\.com"
}

/// Strategy for generating service status lists with unique endpoints
pub fn service_statuses_strategy() -> impl Strategy<Value = Vec<ServiceStatus>> {
    prop::collection::btree_set(endpoint_strategy(), 0..8).prop_flat_map(|endpoints| {
        let endpoints: Vec<String> = endpoints.into_iter().collect();
        let len = endpoints.len();
        (Just(endpoints), prop::collection::vec(any::<bool>(), len)).prop_map(
            |(endpoints, enabled)| {
                endpoints
                    .into_iter()
                    .zip(enabled)
                    .map(|(endpoint, enabled)| {
                        ServiceStatus::new(Service::new(endpoint.clone(), endpoint, ""), enabled)
                    })
                    .collect()
            },
        )
    })
}

/// Strategy for generating whole snapshots
pub fn project_state_strategy() -> impl Strategy<Value = ProjectState> {
    (
        "[a-z][a-z0-9-]{5,20}",
        service_statuses_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(project_id, service_statuses, has_gcs_bucket, has_cloud_function)| ProjectState {
                project_id,
                service_statuses,
                has_gcs_bucket,
                has_cloud_function,
            },
        )
}
