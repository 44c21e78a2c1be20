// Simulated snapshot source - stand-in for a live telemetry feed
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::error::FleetError;
use crate::domain::generator::FleetGenerator;
use crate::domain::snapshot::FleetSnapshot;
use crate::infrastructure::config::GeneratorSettings;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct SimulatedFleetSource {
    generator: FleetGenerator,
    default_count: i64,
    max_count: usize,
}

impl SimulatedFleetSource {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self {
            generator: FleetGenerator::new(settings.to_params()),
            default_count: settings.default_count as i64,
            max_count: settings.max_count,
        }
    }
}

#[async_trait]
impl SnapshotSource for SimulatedFleetSource {
    async fn snapshot(&self, count: i64, seed: Option<u64>) -> anyhow::Result<FleetSnapshot> {
        if count > self.max_count as i64 {
            return Err(FleetError::InvalidArgument(format!(
                "truck count {} exceeds the page maximum of {}",
                count, self.max_count
            ))
            .into());
        }

        let snapshot = self.generator.generate(count, seed)?;
        tracing::info!(
            trucks = snapshot.len(),
            seeded = seed.is_some(),
            "Generated fleet snapshot"
        );
        Ok(snapshot)
    }

    fn default_count(&self) -> i64 {
        self.default_count
    }
}
