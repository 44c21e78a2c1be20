// Source trait for fleet snapshots
use crate::domain::snapshot::FleetSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Produce a fresh snapshot of `count` trucks. Fails with
    /// `FleetError::InvalidArgument` for a negative or oversized count.
    async fn snapshot(&self, count: i64, seed: Option<u64>) -> anyhow::Result<FleetSnapshot>;

    /// Truck count used when a caller does not ask for one.
    fn default_count(&self) -> i64;
}
