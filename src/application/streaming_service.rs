// Streaming dashboard service - Progressive loading with chunked JSON frames
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::{AlertPanel, Dashboard, KpiTile, MapView, PickupPanel, RiskPanel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "id", content = "data", rename_all = "snake_case")]
pub enum DashboardSection {
    Kpis(Vec<KpiTile>),
    FleetMap(MapView),
    Alerts(AlertPanel),
    Risk(RiskPanel),
    Pickups(PickupPanel),
}

impl DashboardSection {
    pub fn id(&self) -> &'static str {
        match self {
            DashboardSection::Kpis(_) => "kpis",
            DashboardSection::FleetMap(_) => "fleet_map",
            DashboardSection::Alerts(_) => "alerts",
            DashboardSection::Risk(_) => "risk",
            DashboardSection::Pickups(_) => "pickups",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton {
        title: String,
        author: Option<String>,
        note: String,
        generated_at: DateTime<Utc>,
        sections: Vec<String>,
    },
    Section {
        section: DashboardSection,
    },
    Complete {
        total_sections: usize,
        duration_ms: i64,
    },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard_service: DashboardService,
}

impl StreamingDashboardService {
    pub fn new(dashboard_service: DashboardService) -> Self {
        Self { dashboard_service }
    }

    /// Build the dashboard up front (so argument errors surface before the
    /// response starts), then emit skeleton, sections and completion.
    pub async fn stream_dashboard(
        &self,
        count: Option<i64>,
        seed: Option<u64>,
    ) -> anyhow::Result<mpsc::Receiver<StreamMessage>> {
        let start_time = Instant::now();
        let dashboard = self.dashboard_service.get_dashboard(count, seed).await?;
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let (skeleton, sections) = split_dashboard(dashboard);
            let total_sections = sections.len();

            if tx.send(skeleton).await.is_err() {
                tracing::debug!("Stream receiver dropped before skeleton");
                return;
            }

            for section in sections {
                let id = section.id();
                if tx.send(StreamMessage::Section { section }).await.is_err() {
                    tracing::debug!("Stream receiver dropped at section {}", id);
                    return;
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as i64;
            let _ = tx
                .send(StreamMessage::Complete {
                    total_sections,
                    duration_ms,
                })
                .await;
        });

        Ok(rx)
    }
}

fn split_dashboard(dashboard: Dashboard) -> (StreamMessage, Vec<DashboardSection>) {
    let sections = vec![
        DashboardSection::Kpis(dashboard.kpis),
        DashboardSection::FleetMap(dashboard.fleet_map),
        DashboardSection::Alerts(dashboard.alerts),
        DashboardSection::Risk(dashboard.risk),
        DashboardSection::Pickups(dashboard.pickups),
    ];

    let skeleton = StreamMessage::Skeleton {
        title: dashboard.title,
        author: dashboard.author,
        note: dashboard.note,
        generated_at: dashboard.generated_at,
        sections: sections.iter().map(|s| s.id().to_string()).collect(),
    };

    (skeleton, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{DashboardSettings, GeneratorSettings};
    use crate::infrastructure::simulated_source::SimulatedFleetSource;
    use std::sync::Arc;

    fn service() -> StreamingDashboardService {
        let source = Arc::new(SimulatedFleetSource::new(&GeneratorSettings::default()));
        StreamingDashboardService::new(DashboardService::new(
            source,
            DashboardSettings::default(),
        ))
    }

    #[tokio::test]
    async fn test_stream_order() {
        let mut rx = service().stream_dashboard(Some(10), Some(4)).await.unwrap();

        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }

        assert_eq!(messages.len(), 7);
        match &messages[0] {
            StreamMessage::Skeleton { sections, .. } => {
                assert_eq!(sections, &["kpis", "fleet_map", "alerts", "risk", "pickups"]);
            }
            other => panic!("expected skeleton, got {:?}", other),
        }
        assert!(matches!(
            &messages[1],
            StreamMessage::Section { section: DashboardSection::Kpis(tiles) } if tiles[0].value == 10
        ));
        assert!(matches!(
            messages.last(),
            Some(StreamMessage::Complete { total_sections: 5, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_count_fails_before_streaming() {
        assert!(service().stream_dashboard(Some(-1), None).await.is_err());
    }

    #[test]
    fn test_message_json_shape() {
        let msg = StreamMessage::Complete {
            total_sections: 5,
            duration_ms: 3,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["total_sections"], 5);

        let msg = StreamMessage::Section {
            section: DashboardSection::Kpis(vec![KpiTile::new("total", "Total Trucks", 3)]),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "section");
        assert_eq!(json["section"]["id"], "kpis");
        assert_eq!(json["section"]["data"][0]["value"], 3);
    }
}
