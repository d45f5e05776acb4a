//! Shared test infrastructure: mock cloud, builders and proptest strategies.

pub mod builders;
pub mod mock_gcp;
pub mod strategies;
