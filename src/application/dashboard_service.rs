// Dashboard service - Use case for building the operations dashboard
use crate::application::presenter::{present, DashboardHeader};
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::dashboard::Dashboard;
use crate::infrastructure::config::DashboardSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SnapshotSource>,
    header: DashboardHeader,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SnapshotSource>, settings: DashboardSettings) -> Self {
        Self {
            source,
            header: DashboardHeader {
                title: settings.title,
                author: settings.author,
            },
        }
    }

    /// Every call regenerates the fleet; nothing carries over between refreshes.
    pub async fn get_dashboard(
        &self,
        count: Option<i64>,
        seed: Option<u64>,
    ) -> anyhow::Result<Dashboard> {
        let count = count.unwrap_or_else(|| self.source.default_count());
        let snapshot = self.source.snapshot(count, seed).await?;
        let dashboard = present(&snapshot, &self.header);

        tracing::debug!(
            "Built dashboard: {} alerts, {} empty trucks",
            dashboard.alerts.trucks.len(),
            dashboard.pickups.trucks.len()
        );

        Ok(dashboard)
    }
}
