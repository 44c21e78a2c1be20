// Truck snapshot domain model and delay classification
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trucks arriving this many minutes (or more) before their SLA are on time.
pub const ON_TIME_MARGIN_MINUTES: f64 = -15.0;

/// Risk score assigned to on-time trucks.
pub const LOW_RISK_SCORE: f64 = 0.2;

/// Risk score assigned to trucks inside the grace band before their SLA.
pub const MEDIUM_RISK_SCORE: f64 = 0.5;

/// Minutes of lateness that add a full 1.0 to the delayed risk score.
const DELAY_SCORE_SCALE_MINUTES: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelayStatus {
    #[serde(rename = "On Time")]
    OnTime,
    #[serde(rename = "Near SLA")]
    NearSla,
    #[serde(rename = "Delayed")]
    Delayed,
}

impl DelayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelayStatus::OnTime => "On Time",
            DelayStatus::NearSla => "Near SLA",
            DelayStatus::Delayed => "Delayed",
        }
    }

    /// Statuses that belong on the alert list.
    pub fn needs_attention(&self) -> bool {
        matches!(self, DelayStatus::NearSla | DelayStatus::Delayed)
    }
}

impl fmt::Display for DelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Medium => "Medium",
            RiskLabel::High => "High",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a single delay value. Status, score and label are
/// always produced together so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub status: DelayStatus,
    pub score: f64,
    pub label: RiskLabel,
}

/// Classify a signed delay (minutes, positive = late) against the SLA.
///
/// - `delay <= -15` is on time (low risk, 0.2)
/// - `-15 < delay <= 0` is near the SLA (medium risk, 0.5)
/// - `delay > 0` is delayed; the score grows linearly from 0.5 and
///   saturates at 1.0 once the truck is 30 minutes late
pub fn classify_delay(delay_minutes: f64) -> RiskAssessment {
    if delay_minutes <= ON_TIME_MARGIN_MINUTES {
        RiskAssessment {
            status: DelayStatus::OnTime,
            score: LOW_RISK_SCORE,
            label: RiskLabel::Low,
        }
    } else if delay_minutes <= 0.0 {
        RiskAssessment {
            status: DelayStatus::NearSla,
            score: MEDIUM_RISK_SCORE,
            label: RiskLabel::Medium,
        }
    } else {
        RiskAssessment {
            status: DelayStatus::Delayed,
            score: (MEDIUM_RISK_SCORE + delay_minutes / DELAY_SCORE_SCALE_MINUTES).min(1.0),
            label: RiskLabel::High,
        }
    }
}

/// One row of a fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSnapshot {
    pub truck_id: String,
    pub lat: f64,
    pub lon: f64,
    pub speed_kmh: f64,
    pub remaining_km: f64,
    pub eta_utc: DateTime<Utc>,
    pub sla_deadline_utc: DateTime<Utc>,
    pub delay_minutes_vs_sla: f64,
    pub delay_status: DelayStatus,
    pub risk_score: f64,
    pub risk_label: RiskLabel,
    pub is_empty: bool,
    pub potential_pickups_nearby: u32,
}

/// Format a 1-based fleet position as a truck id (`T001`, `T042`, `T1000`).
pub fn format_truck_id(position: usize) -> String {
    format!("T{:03}", position)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let on_time = classify_delay(-15.0);
        assert_eq!(on_time.status, DelayStatus::OnTime);
        assert_eq!(on_time.score, 0.2);
        assert_eq!(on_time.label, RiskLabel::Low);

        let near = classify_delay(0.0);
        assert_eq!(near.status, DelayStatus::NearSla);
        assert_eq!(near.score, 0.5);
        assert_eq!(near.label, RiskLabel::Medium);

        let saturated = classify_delay(30.0);
        assert_eq!(saturated.status, DelayStatus::Delayed);
        assert_eq!(saturated.score, 1.0);
        assert_eq!(saturated.label, RiskLabel::High);
    }

    #[test]
    fn test_classify_partial_delay() {
        let assessment = classify_delay(10.0);
        assert_eq!(assessment.status, DelayStatus::Delayed);
        assert!((assessment.score - 0.6667).abs() < 1e-4);
        assert_eq!(round_to(assessment.score, 2), 0.67);
    }

    #[test]
    fn test_classify_just_inside_bands() {
        assert_eq!(classify_delay(-15.1).status, DelayStatus::OnTime);
        assert_eq!(classify_delay(-14.9).status, DelayStatus::NearSla);
        assert_eq!(classify_delay(0.1).status, DelayStatus::Delayed);
        assert_eq!(classify_delay(-600.0).score, 0.2);
        assert_eq!(classify_delay(600.0).score, 1.0);
    }

    #[test]
    fn test_delayed_score_is_monotonic() {
        let mut previous = 0.0;
        for tenth in 1..=600 {
            let score = classify_delay(tenth as f64 / 10.0).score;
            assert!(score >= previous);
            assert!(score <= 1.0);
            previous = score;
        }
    }

    #[test]
    fn test_status_serializes_with_display_names() {
        assert_eq!(serde_json::to_string(&DelayStatus::NearSla).unwrap(), "\"Near SLA\"");
        assert_eq!(serde_json::to_string(&DelayStatus::OnTime).unwrap(), "\"On Time\"");
        assert_eq!(serde_json::to_string(&RiskLabel::High).unwrap(), "\"High\"");
        assert!(DelayStatus::Delayed.needs_attention());
        assert!(!DelayStatus::OnTime.needs_attention());
    }

    #[test]
    fn test_format_truck_id() {
        assert_eq!(format_truck_id(1), "T001");
        assert_eq!(format_truck_id(30), "T030");
        assert_eq!(format_truck_id(1000), "T1000");
    }
}
