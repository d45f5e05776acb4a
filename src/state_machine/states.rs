use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// No run in flight; the last run (if any) did not finish cleanly
    #[default]
    Idle,
    /// Batched API enablement call is in flight
    EnablingApis,
    /// Bucket and/or function creation is in flight
    CreatingResources,
    /// Last run finished with every phase succeeding
    Done,
}

impl RunPhase {
    /// Check if a new Initialize trigger may start a run from this phase
    pub fn accepts_trigger(&self) -> bool {
        matches!(self, Self::Idle | Self::Done)
    }

    /// Check if remote work is currently in flight
    pub fn is_active(&self) -> bool {
        matches!(self, Self::EnablingApis | Self::CreatingResources)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::EnablingApis => write!(f, "enabling_apis"),
            Self::CreatingResources => write!(f, "creating_resources"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for RunPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "enabling_apis" => Ok(Self::EnablingApis),
            "creating_resources" => Ok(Self::CreatingResources),
            "done" => Ok(Self::Done),
            _ => Err(format!("Invalid run phase: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_acceptance() {
        assert!(RunPhase::Idle.accepts_trigger());
        assert!(RunPhase::Done.accepts_trigger());
        assert!(!RunPhase::EnablingApis.accepts_trigger());
        assert!(!RunPhase::CreatingResources.accepts_trigger());
    }

    #[test]
    fn test_phase_string_conversion() {
        assert_eq!(RunPhase::CreatingResources.to_string(), "creating_resources");
        assert_eq!(
            "enabling_apis".parse::<RunPhase>().unwrap(),
            RunPhase::EnablingApis
        );
        assert!("finished".parse::<RunPhase>().is_err());
    }

    #[test]
    fn test_phase_serde() {
        let json = serde_json::to_string(&RunPhase::EnablingApis).unwrap();
        assert_eq!(json, "\"enabling_apis\"");
    }
}
