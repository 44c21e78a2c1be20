// Dashboard view model
use super::truck::{DelayStatus, RiskLabel, TruckSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub author: Option<String>,
    pub note: String,
    pub generated_at: DateTime<Utc>,
    pub kpis: Vec<KpiTile>,
    pub fleet_map: MapView,
    pub alerts: AlertPanel,
    pub risk: RiskPanel,
    pub pickups: PickupPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub id: String,
    pub title: String,
    pub value: usize,
}

impl KpiTile {
    pub fn new(id: &str, title: &str, value: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub truck_id: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub points: Vec<MapPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertPanel {
    pub title: String,
    pub notice: Notice,
    pub trucks: Vec<TruckSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: RiskLabel,
    pub count: usize,
}

/// Column subset shown in the risk ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRow {
    pub truck_id: String,
    pub risk_label: RiskLabel,
    pub risk_score: f64,
    pub delay_status: DelayStatus,
    pub eta_utc: DateTime<Utc>,
    pub sla_deadline_utc: DateTime<Utc>,
}

impl From<&TruckSnapshot> for RiskRow {
    fn from(truck: &TruckSnapshot) -> Self {
        Self {
            truck_id: truck.truck_id.clone(),
            risk_label: truck.risk_label,
            risk_score: truck.risk_score,
            delay_status: truck.delay_status,
            eta_utc: truck.eta_utc,
            sla_deadline_utc: truck.sla_deadline_utc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskPanel {
    pub title: String,
    pub label_counts: Vec<LabelCount>,
    pub ranking: Vec<RiskRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupPanel {
    pub title: String,
    /// Present only when there are no empty trucks.
    pub notice: Option<Notice>,
    pub trucks: Vec<TruckSnapshot>,
    pub map: Option<MapView>,
}
