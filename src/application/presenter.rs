// Snapshot presenter - Turns a fleet snapshot into dashboard views
//
// Every view is a filter, count or sort over fields the generator already
// derived. The snapshot is only read.
use crate::domain::dashboard::{
    AlertPanel, Dashboard, KpiTile, LabelCount, MapPoint, MapView, Notice, NoticeLevel,
    PickupPanel, RiskPanel, RiskRow,
};
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::truck::{DelayStatus, RiskLabel, TruckSnapshot};

pub const SIMULATED_NOTE: &str = "Simulated data only";
pub const ALERTS_CLEAR: &str = "All trucks are currently on time.";
pub const ALERTS_PRESENT: &str = "Some trucks are delayed or close to SLA.";
pub const NO_EMPTY_TRUCKS: &str = "No empty trucks right now.";

/// Page-level text that does not come from the snapshot.
#[derive(Debug, Clone)]
pub struct DashboardHeader {
    pub title: String,
    pub author: Option<String>,
}

pub fn present(snapshot: &FleetSnapshot, header: &DashboardHeader) -> Dashboard {
    let trucks = snapshot.trucks();

    Dashboard {
        title: header.title.clone(),
        author: header.author.clone(),
        note: SIMULATED_NOTE.to_string(),
        generated_at: snapshot.generated_at(),
        kpis: kpis(trucks),
        fleet_map: map_view("1. Live Map of All Trucks", trucks.iter()),
        alerts: alert_panel(trucks),
        risk: risk_panel(trucks),
        pickups: pickup_panel(trucks),
    }
}

pub fn kpis(trucks: &[TruckSnapshot]) -> Vec<KpiTile> {
    let with_status =
        |status: DelayStatus| trucks.iter().filter(|t| t.delay_status == status).count();

    vec![
        KpiTile::new("total", "Total Trucks", trucks.len()),
        KpiTile::new("delayed", "Delayed Trucks", with_status(DelayStatus::Delayed)),
        KpiTile::new("near_sla", "Near SLA", with_status(DelayStatus::NearSla)),
        KpiTile::new("empty", "Empty Trucks", trucks.iter().filter(|t| t.is_empty).count()),
    ]
}

fn map_view<'a>(title: &str, trucks: impl Iterator<Item = &'a TruckSnapshot>) -> MapView {
    MapView {
        title: title.to_string(),
        points: trucks
            .map(|t| MapPoint {
                truck_id: t.truck_id.clone(),
                lat: t.lat,
                lon: t.lon,
            })
            .collect(),
    }
}

pub fn alert_panel(trucks: &[TruckSnapshot]) -> AlertPanel {
    let alerts: Vec<TruckSnapshot> = trucks
        .iter()
        .filter(|t| t.delay_status.needs_attention())
        .cloned()
        .collect();

    let notice = if alerts.is_empty() {
        Notice::new(NoticeLevel::Success, ALERTS_CLEAR)
    } else {
        Notice::new(NoticeLevel::Warning, ALERTS_PRESENT)
    };

    AlertPanel {
        title: "2. Real-Time ETA and Delay Alerts".to_string(),
        notice,
        trucks: alerts,
    }
}

pub fn risk_panel(trucks: &[TruckSnapshot]) -> RiskPanel {
    let mut ranking: Vec<RiskRow> = trucks.iter().map(RiskRow::from).collect();
    // sort_by is stable, so equal scores keep fleet order
    ranking.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));

    RiskPanel {
        title: "3. SLA Risk Monitoring".to_string(),
        label_counts: label_counts(trucks),
        ranking,
    }
}

/// Trucks per risk label, most frequent first. Labels with no trucks are
/// left out; ties put the more severe label first.
pub fn label_counts(trucks: &[TruckSnapshot]) -> Vec<LabelCount> {
    let mut counts: Vec<LabelCount> = [RiskLabel::High, RiskLabel::Medium, RiskLabel::Low]
        .into_iter()
        .map(|label| LabelCount {
            label,
            count: trucks.iter().filter(|t| t.risk_label == label).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count).then(b.label.cmp(&a.label)));
    counts
}

pub fn pickup_panel(trucks: &[TruckSnapshot]) -> PickupPanel {
    let empty: Vec<TruckSnapshot> = trucks.iter().filter(|t| t.is_empty).cloned().collect();
    let title = "4. Pickup Opportunities for Empty Trucks".to_string();

    if empty.is_empty() {
        return PickupPanel {
            title,
            notice: Some(Notice::new(NoticeLevel::Info, NO_EMPTY_TRUCKS)),
            trucks: empty,
            map: None,
        };
    }

    let map = map_view("Empty Truck Positions", empty.iter());
    PickupPanel {
        title,
        notice: None,
        trucks: empty,
        map: Some(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generator::FleetGenerator;
    use crate::domain::truck::classify_delay;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn truck(id: &str, delay: f64, is_empty: bool) -> TruckSnapshot {
        let risk = classify_delay(delay);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        TruckSnapshot {
            truck_id: id.to_string(),
            lat: 41.0,
            lon: -93.0,
            speed_kmh: 60.0,
            remaining_km: 60.0,
            eta_utc: now,
            sla_deadline_utc: now,
            delay_minutes_vs_sla: delay,
            delay_status: risk.status,
            risk_score: risk.score,
            risk_label: risk.label,
            is_empty,
            potential_pickups_nearby: if is_empty { 2 } else { 0 },
        }
    }

    fn header() -> DashboardHeader {
        DashboardHeader {
            title: "Ops".to_string(),
            author: None,
        }
    }

    fn kpi(tiles: &[KpiTile], id: &str) -> usize {
        tiles.iter().find(|t| t.id == id).map(|t| t.value).unwrap()
    }

    #[test]
    fn test_kpis_count_by_status() {
        let trucks = vec![
            truck("T001", -30.0, false),
            truck("T002", -5.0, true),
            truck("T003", 12.0, false),
            truck("T004", 45.0, true),
        ];
        let tiles = kpis(&trucks);
        assert_eq!(kpi(&tiles, "total"), 4);
        assert_eq!(kpi(&tiles, "delayed"), 2);
        assert_eq!(kpi(&tiles, "near_sla"), 1);
        assert_eq!(kpi(&tiles, "empty"), 2);
    }

    #[test]
    fn test_alerts_include_delayed_and_near_sla_only() {
        let trucks = vec![
            truck("T001", -30.0, false),
            truck("T002", -5.0, false),
            truck("T003", 12.0, false),
        ];
        let panel = alert_panel(&trucks);
        let ids: Vec<&str> = panel.trucks.iter().map(|t| t.truck_id.as_str()).collect();
        assert_eq!(ids, vec!["T002", "T003"]);
        assert_eq!(panel.notice.level, NoticeLevel::Warning);
        assert_eq!(panel.notice.message, ALERTS_PRESENT);
    }

    #[test]
    fn test_alerts_empty_state() {
        let trucks = vec![truck("T001", -30.0, false), truck("T002", -15.0, false)];
        let panel = alert_panel(&trucks);
        assert!(panel.trucks.is_empty());
        assert_eq!(panel.notice.level, NoticeLevel::Success);
        assert_eq!(panel.notice.message, ALERTS_CLEAR);
    }

    #[test]
    fn test_risk_ranking_sorted_descending_and_stable() {
        let trucks = vec![
            truck("T001", -30.0, false),
            truck("T002", 6.0, false),
            truck("T003", -20.0, false),
            truck("T004", 40.0, false),
            truck("T005", -1.0, false),
        ];
        let panel = risk_panel(&trucks);
        let ids: Vec<&str> = panel.ranking.iter().map(|r| r.truck_id.as_str()).collect();
        assert_eq!(ids, vec!["T004", "T002", "T005", "T001", "T003"]);
        assert!(panel.ranking.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
    }

    #[test]
    fn test_label_counts_omit_missing_labels() {
        let trucks = vec![
            truck("T001", -30.0, false),
            truck("T002", -40.0, false),
            truck("T003", 5.0, false),
        ];
        let counts = label_counts(&trucks);
        assert_eq!(
            counts,
            vec![
                LabelCount { label: RiskLabel::Low, count: 2 },
                LabelCount { label: RiskLabel::High, count: 1 },
            ]
        );
    }

    #[test]
    fn test_label_count_ties_put_severe_first() {
        let trucks = vec![
            truck("T001", -30.0, false),
            truck("T002", -5.0, false),
            truck("T003", 5.0, false),
        ];
        let labels: Vec<RiskLabel> = label_counts(&trucks).iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![RiskLabel::High, RiskLabel::Medium, RiskLabel::Low]);
    }

    #[test]
    fn test_pickup_panel_with_and_without_empty_trucks() {
        let panel = pickup_panel(&[truck("T001", -30.0, false)]);
        assert!(panel.trucks.is_empty());
        assert!(panel.map.is_none());
        assert_eq!(panel.notice.unwrap().message, NO_EMPTY_TRUCKS);

        let panel = pickup_panel(&[truck("T001", -30.0, true), truck("T002", 5.0, false)]);
        assert!(panel.notice.is_none());
        assert_eq!(panel.trucks.len(), 1);
        let map = panel.map.unwrap();
        assert_eq!(map.points.len(), 1);
        assert_eq!(map.points[0].truck_id, "T001");
    }

    #[test]
    fn test_present_does_not_alter_snapshot() {
        let mut rng = StdRng::seed_from_u64(5);
        let reference = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let snapshot = FleetGenerator::default()
            .generate_at(30, &mut rng, reference)
            .unwrap();
        let before = snapshot.clone();

        let dashboard = present(&snapshot, &header());

        assert_eq!(snapshot, before);
        assert_eq!(dashboard.title, "Ops");
        assert_eq!(dashboard.note, SIMULATED_NOTE);
        assert_eq!(dashboard.generated_at, reference);
        assert_eq!(dashboard.fleet_map.points.len(), 30);
        assert_eq!(dashboard.risk.ranking.len(), 30);
        let counted: usize = dashboard.risk.label_counts.iter().map(|c| c.count).sum();
        assert_eq!(counted, 30);
    }

    #[test]
    fn test_present_empty_snapshot() {
        let snapshot = FleetSnapshot::new(Utc::now(), Vec::new());
        let dashboard = present(&snapshot, &header());
        assert!(dashboard.kpis.iter().all(|k| k.value == 0));
        assert!(dashboard.fleet_map.points.is_empty());
        assert_eq!(dashboard.alerts.notice.level, NoticeLevel::Success);
        assert!(dashboard.risk.label_counts.is_empty());
        assert!(dashboard.pickups.notice.is_some());
    }
}
