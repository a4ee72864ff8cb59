use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};

/// Telemetry sink for pipeline runs. Writers treat failures as
/// best-effort: a telemetry error must never fail the operation that
/// produced it.
pub trait PerfLogRepository: Send + Sync {
    fn log(
        &self,
        level: &str,
        message: &str,
        context: &str,
        extra: Option<serde_json::Value>,
    ) -> Result<(), DomainError>;

    /// Delete events recorded before `cutoff`. Returns the deleted count.
    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
