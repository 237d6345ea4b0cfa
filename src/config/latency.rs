use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// How slow the in-memory notification API pretends to be.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LatencyProfile {
    Realistic, // production-like delays with jitter
    Instant,   // tests and local tooling
}

impl FromStr for LatencyProfile {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "realistic" => Ok(LatencyProfile::Realistic),
            "instant" => Ok(LatencyProfile::Instant),
            other => Err(anyhow!("unknown latency profile: {}", other)),
        }
    }
}

/// Operations of the mock notification API that sleep before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    List,
    MarkRead,
    MarkAllRead,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockLatency {
    pub list_ms: u64,
    pub mark_read_ms: u64,
    pub mark_all_read_ms: u64,
    pub delete_ms: u64,

    /// Fraction of the base delay added as random jitter.
    pub jitter: f64,
}

impl MockLatency {
    pub fn for_profile(profile: LatencyProfile) -> Self {
        match profile {
            LatencyProfile::Realistic => MockLatency {
                list_ms: 700,
                mark_read_ms: 300,
                mark_all_read_ms: 500,
                delete_ms: 300,
                jitter: 0.2,
            },
            LatencyProfile::Instant => MockLatency {
                list_ms: 0,
                mark_read_ms: 0,
                mark_all_read_ms: 0,
                delete_ms: 0,
                jitter: 0.0,
            },
        }
    }

    pub fn base_delay(&self, operation: MockOperation) -> Duration {
        let ms = match operation {
            MockOperation::List => self.list_ms,
            MockOperation::MarkRead => self.mark_read_ms,
            MockOperation::MarkAllRead => self.mark_all_read_ms,
            MockOperation::Delete => self.delete_ms,
        };
        Duration::from_millis(ms)
    }
}
