// Fleet snapshot domain model
use super::truck::TruckSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point-in-time table of trucks. Rows are fixed at construction and only
/// ever handed out by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSnapshot {
    generated_at: DateTime<Utc>,
    trucks: Vec<TruckSnapshot>,
}

impl FleetSnapshot {
    pub fn new(generated_at: DateTime<Utc>, trucks: Vec<TruckSnapshot>) -> Self {
        Self {
            generated_at,
            trucks,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn trucks(&self) -> &[TruckSnapshot] {
        &self.trucks
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }
}
