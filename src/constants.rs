//! # Provisioning Constants
//!
//! Fixed values shared by the orchestrator and the presentation contract.

/// Region the scheduler's Cloud Function is deployed to.
pub const DEFAULT_REGION: &str = "us-central1";

/// User-facing failure messages, one per remediation phase.
pub mod messages {
    pub const ENABLE_APIS_FAILED: &str = "Unable to enable necessary GCP APIs";
    pub const CREATE_FUNCTION_FAILED: &str = "Unable to create Cloud Function";
    pub const CREATE_BUCKET_FAILED: &str = "Unable to create GCS Bucket";
    pub const SNAPSHOT_FAILED: &str = "Unable to load project state";
}

/// Progress notices shown while a phase is in flight.
pub mod notices {
    pub const VALIDATING: &str = "Validating project configuration...";
    pub const ENABLING_APIS: &str = "Enabling GCP API(s)...";
    pub const CREATING_BUCKET: &str = "Creating Cloud Storage Bucket..";
    pub const CREATING_FUNCTION: &str = "Creating Cloud Function...";
}

/// Checklist labels for the non-service prerequisites.
pub mod labels {
    pub const HAS_BUCKET: &str = "Has GCS Bucket?";
    pub const HAS_FUNCTION: &str = "Has Cloud Function?";
}

/// Environment variables read by configuration and logging.
pub mod env {
    pub const ENVIRONMENT: &str = "PROVISIONING_ENV";
    pub const FALLBACK_ENVIRONMENT: &str = "APP_ENV";
    pub const CONFIG_PREFIX: &str = "PROVISIONING";
    pub const LOG_FORMAT: &str = "PROVISIONING_LOG_FORMAT";
}
