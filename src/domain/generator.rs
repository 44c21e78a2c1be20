// Synthetic fleet snapshot generator
use super::error::FleetError;
use super::snapshot::FleetSnapshot;
use super::truck::{classify_delay, format_truck_id, round_to, TruckSnapshot};
use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

pub const DEFAULT_TRUCK_COUNT: usize = 30;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;
const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Tunables for the simulated fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub base_lat: f64,
    pub base_lon: f64,
    pub position_spread_deg: f64,
    pub speed_kmh: (f64, f64),
    pub remaining_km: (f64, f64),
    pub sla_hours: (f64, f64),
    pub empty_probability: f64,
    pub max_pickups: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        // Midwest USA
        Self {
            base_lat: 41.0,
            base_lon: -93.0,
            position_spread_deg: 1.0,
            speed_kmh: (30.0, 90.0),
            remaining_km: (5.0, 150.0),
            sla_hours: (0.5, 3.0),
            empty_probability: 0.25,
            max_pickups: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FleetGenerator {
    params: GeneratorParams,
}

impl FleetGenerator {
    pub fn new(params: GeneratorParams) -> Self {
        Self { params }
    }

    /// Generate a snapshot stamped with the current time. A seed makes the
    /// rows reproducible; without one the generator draws from OS entropy.
    ///
    /// Timestamps are relative to the call's clock reading, so two seeded
    /// calls agree on every relative field but not on `generated_at`,
    /// `eta_utc` or `sla_deadline_utc`. Use `generate_at` with a fixed
    /// reference for byte-identical snapshots.
    pub fn generate(&self, count: i64, seed: Option<u64>) -> Result<FleetSnapshot, FleetError> {
        let count = self.validate_count(count)?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_at(count, &mut rng, Utc::now())
    }

    /// Generate `count` rows relative to `reference`, drawing every random
    /// value from `rng`.
    pub fn generate_at<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
        reference: DateTime<Utc>,
    ) -> Result<FleetSnapshot, FleetError> {
        let p = &self.params;
        let lat_dist = normal(p.base_lat, p.position_spread_deg)?;
        let lon_dist = normal(p.base_lon, p.position_spread_deg)?;
        let speed_dist = uniform("speed_kmh", p.speed_kmh)?;
        let distance_dist = uniform("remaining_km", p.remaining_km)?;
        let sla_dist = uniform("sla_hours", p.sla_hours)?;
        if !(0.0..=1.0).contains(&p.empty_probability) {
            return Err(FleetError::InvalidArgument(format!(
                "empty_probability {} is outside [0, 1]",
                p.empty_probability
            )));
        }
        if p.speed_kmh.0 <= 0.0 || p.remaining_km.0 <= 0.0 {
            return Err(FleetError::InvalidArgument(
                "speed and remaining distance ranges must be positive".to_string(),
            ));
        }

        let mut trucks = Vec::with_capacity(count);
        for position in 1..=count {
            let lat = lat_dist.sample(rng);
            let lon = lon_dist.sample(rng);
            let speed_kmh = speed_dist.sample(rng);
            let remaining_km = distance_dist.sample(rng);
            let sla_hours = sla_dist.sample(rng);
            let is_empty = rng.gen_bool(p.empty_probability);
            let potential_pickups_nearby = if is_empty {
                rng.gen_range(0..=p.max_pickups)
            } else {
                0
            };

            let eta_micros = hours_to_micros(remaining_km / speed_kmh);
            let sla_micros = hours_to_micros(sla_hours);
            let eta_utc = reference + TimeDelta::microseconds(eta_micros);
            let sla_deadline_utc = reference + TimeDelta::microseconds(sla_micros);
            let delay_minutes = (eta_micros - sla_micros) as f64 / MICROS_PER_MINUTE;

            // Classify the stored value so the row is self-consistent.
            let delay_minutes_vs_sla = round_to(delay_minutes, 1);
            let risk = classify_delay(delay_minutes_vs_sla);

            trucks.push(TruckSnapshot {
                truck_id: format_truck_id(position),
                lat,
                lon,
                speed_kmh: round_to(speed_kmh, 1),
                remaining_km: round_to(remaining_km, 1),
                eta_utc,
                sla_deadline_utc,
                delay_minutes_vs_sla,
                delay_status: risk.status,
                risk_score: round_to(risk.score, 2),
                risk_label: risk.label,
                is_empty,
                potential_pickups_nearby,
            });
        }

        tracing::debug!("Generated {} trucks at {}", trucks.len(), reference);
        Ok(FleetSnapshot::new(reference, trucks))
    }

    fn validate_count(&self, count: i64) -> Result<usize, FleetError> {
        usize::try_from(count).map_err(|_| {
            FleetError::InvalidArgument(format!("truck count must be non-negative, got {}", count))
        })
    }
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self::new(GeneratorParams::default())
    }
}

/// Generate a snapshot with default parameters.
pub fn generate(count: i64, seed: Option<u64>) -> Result<FleetSnapshot, FleetError> {
    FleetGenerator::default().generate(count, seed)
}

fn hours_to_micros(value: f64) -> i64 {
    (value * MICROS_PER_HOUR).round() as i64
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, FleetError> {
    Normal::new(mean, std_dev).map_err(|e| {
        FleetError::InvalidArgument(format!("invalid position spread {}: {}", std_dev, e))
    })
}

fn uniform(name: &str, (low, high): (f64, f64)) -> Result<Uniform<f64>, FleetError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(FleetError::InvalidArgument(format!(
            "{} range [{}, {}) is empty or not finite",
            name, low, high
        )));
    }
    Ok(Uniform::new(low, high))
}
