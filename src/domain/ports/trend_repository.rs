use crate::domain::entities::trend_candidate::TrendCandidate;
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};

/// Store contract for the trend candidate pool. Ingest writes are
/// insert-or-replace by the candidate's storage key; the only field-level
/// update is the hydration backfill of a missing identifier.
pub trait TrendRepository: Send + Sync {
    /// Upsert candidates by storage key. A row with an existing key is
    /// fully replaced.
    fn upsert(&self, candidates: &[TrendCandidate]) -> Result<(), DomainError>;

    /// Candidates captured at or after `cutoff`, newest first, capped.
    fn recent_since(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<TrendCandidate>, DomainError>;

    /// Delete rows captured before `cutoff`. Returns the deleted count.
    fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Rows stored without a marketplace identifier, oldest first, capped.
    fn missing_asin(&self, limit: usize) -> Result<Vec<TrendCandidate>, DomainError>;

    /// Backfill the identifier on the row with the given storage key.
    fn set_asin(&self, storage_key: &str, asin: &str) -> Result<(), DomainError>;
}
