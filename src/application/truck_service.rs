// Truck service - Use case for fetching the raw snapshot table
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::snapshot::FleetSnapshot;
use std::sync::Arc;

#[derive(Clone)]
pub struct TruckService {
    source: Arc<dyn SnapshotSource>,
}

impl TruckService {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    pub async fn list_trucks(
        &self,
        count: Option<i64>,
        seed: Option<u64>,
    ) -> anyhow::Result<FleetSnapshot> {
        let count = count.unwrap_or_else(|| self.source.default_count());
        self.source.snapshot(count, seed).await
    }
}
