//! Database liveness check

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of one liveness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub latency_ms: u64,
    /// Driver message when the probe failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self.status, HealthStatus::Healthy)
    }
}

/// Run `SELECT 1` on the shared handle
///
/// Never fails: any error becomes an unhealthy report carrying the reason.
/// The reason is not classified, so a dropped network, bad credentials and a
/// closed handle all look the same apart from the message.
pub async fn test_connection(db: &Database) -> HealthReport {
    let started = Instant::now();
    let outcome = sqlx::query("SELECT 1").execute(db.pool()).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(_) => HealthReport {
            status: HealthStatus::Healthy,
            latency_ms,
            error: None,
        },
        Err(e) => {
            warn!("Database health check failed: {}", e);
            HealthReport {
                status: HealthStatus::Unhealthy,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
