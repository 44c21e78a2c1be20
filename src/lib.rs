//! Fleet operations dashboard: a synthetic truck-fleet snapshot generator,
//! the delay/SLA risk classification behind it, and an HTTP surface that
//! presents each snapshot as KPIs, maps, alerts and risk rankings.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::error::FleetError;
pub use domain::generator::{generate, FleetGenerator, GeneratorParams, DEFAULT_TRUCK_COUNT};
pub use domain::snapshot::FleetSnapshot;
pub use domain::truck::{classify_delay, DelayStatus, RiskAssessment, RiskLabel, TruckSnapshot};
