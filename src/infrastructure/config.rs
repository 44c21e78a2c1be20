use crate::domain::generator::{GeneratorParams, DEFAULT_TRUCK_COUNT};
use serde::Deserialize;

/// Largest fleet a single page request may ask for.
pub const DEFAULT_MAX_COUNT: usize = 1000;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub generator: GeneratorSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorSettings {
    pub default_count: usize,
    pub max_count: usize,
    pub base_lat: f64,
    pub base_lon: f64,
    pub position_spread_deg: f64,
    pub empty_probability: f64,
    pub max_pickups: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let params = GeneratorParams::default();
        Self {
            default_count: DEFAULT_TRUCK_COUNT,
            max_count: DEFAULT_MAX_COUNT,
            base_lat: params.base_lat,
            base_lon: params.base_lon,
            position_spread_deg: params.position_spread_deg,
            empty_probability: params.empty_probability,
            max_pickups: params.max_pickups,
        }
    }
}

impl GeneratorSettings {
    pub fn to_params(&self) -> GeneratorParams {
        GeneratorParams {
            base_lat: self.base_lat,
            base_lon: self.base_lon,
            position_spread_deg: self.position_spread_deg,
            empty_probability: self.empty_probability,
            max_pickups: self.max_pickups,
            ..GeneratorParams::default()
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub author: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "StreamLine Real-Time Operations Dashboard".to_string(),
            author: None,
        }
    }
}

/// Load settings from `config/fleet.toml` (optional) with `FLEET__*`
/// environment overrides, e.g. `FLEET__SERVER__PORT=9090`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/fleet").required(false))
        .add_source(
            config::Environment::with_prefix("FLEET")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_config_parses() {
        let config: AppConfig = toml::from_str(include_str!("../../config/fleet.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generator.default_count, 30);
        assert_eq!(config.generator.to_params(), GeneratorParams::default());
        assert_eq!(config.dashboard.author.as_deref(), Some("Sumin Lee"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generator.max_count, 1000);
        assert_eq!(
            config.dashboard.title,
            "StreamLine Real-Time Operations Dashboard"
        );
    }
}
