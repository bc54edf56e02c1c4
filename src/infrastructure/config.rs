use crate::application::playback::PlaybackSettings;
use chrono::NaiveDateTime;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub server: ServerSettings,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlaybackConfig {
    pub base_period_ms: u64,
    pub min_period_ms: u64,
    pub min_speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        let settings = PlaybackSettings::default();
        Self {
            base_period_ms: settings.base_period.as_millis() as u64,
            min_period_ms: settings.min_period.as_millis() as u64,
            min_speed: settings.min_speed,
        }
    }
}

impl PlaybackConfig {
    pub fn to_settings(&self) -> anyhow::Result<PlaybackSettings> {
        if self.base_period_ms == 0 || self.min_period_ms == 0 {
            anyhow::bail!("playback periods must be positive");
        }
        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            anyhow::bail!("playback.min_speed must be positive, got {}", self.min_speed);
        }
        Ok(PlaybackSettings {
            base_period: Duration::from_millis(self.base_period_ms),
            min_period: Duration::from_millis(self.min_period_ms),
            min_speed: self.min_speed,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub records: Vec<SeedRecord>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedRecord {
    pub point_id: String,
    pub timestamp: NaiveDateTime,
    pub duration_minutes: i64,
}

pub fn load_engine_config() -> anyhow::Result<EngineConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/engine").required(false))
        .add_source(config::Environment::with_prefix("QUEUE_REPLAY").separator("__"));

    engine_config_from(builder)
}

pub fn load_seed_config() -> anyhow::Result<SeedConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/seed").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn engine_config_from(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<EngineConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults_without_sources() {
        let config = engine_config_from(config::Config::builder()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");

        let settings = config.playback.to_settings().unwrap();
        assert_eq!(settings, PlaybackSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
            [playback]
            base_period_ms = 1000
        "#;
        let builder = config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        let config = engine_config_from(builder).unwrap();

        assert_eq!(config.playback.base_period_ms, 1000);
        assert_eq!(config.playback.min_period_ms, 80);
    }

    #[test]
    fn test_rejects_non_positive_min_speed() {
        let playback = PlaybackConfig {
            min_speed: 0.0,
            ..PlaybackConfig::default()
        };
        assert!(playback.to_settings().is_err());
    }

    #[test]
    fn test_rejects_zero_period_floor() {
        let playback = PlaybackConfig {
            min_period_ms: 0,
            ..PlaybackConfig::default()
        };
        assert!(playback.to_settings().is_err());
    }

    #[test]
    fn test_seed_records_parse() {
        let toml = r#"
            [[records]]
            point_id = "BN01"
            timestamp = "2024-09-01T13:10:00"
            duration_minutes = 335
        "#;
        let settings = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let seed: SeedConfig = settings.try_deserialize().unwrap();

        assert_eq!(seed.records.len(), 1);
        assert_eq!(seed.records[0].point_id, "BN01");
        assert_eq!(seed.records[0].timestamp.to_string(), "2024-09-01 13:10:00");
    }
}
