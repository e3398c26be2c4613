use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations tried when no explicit config path is given.
pub const SEARCH_PATHS: [&str; 2] = ["configs/chart.toml", "../../configs/chart.toml"];

/// Environment variable that overrides `[ephemeris] path`.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub observer: ObserverConfig,
    pub ephemeris: EphemerisConfig,
    pub chart: ChartDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Offset of the observer's civil time from UTC.
    pub utc_offset_minutes: i32,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        // New Delhi, IST
        Self {
            latitude: 28.6139,
            longitude: 77.2090,
            utc_offset_minutes: 330,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartDefaults {
    pub width: u32,
    pub height: u32,
    pub show_rashi_circle: bool,
    /// One of "default", "kp", "lahiri" or "custom".
    pub ayanamsa: String,
    /// Offset used when `ayanamsa = "custom"`.
    pub default_ayanamsa_degrees: f64,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1000,
            show_rashi_circle: true,
            ayanamsa: "default".to_string(),
            default_ayanamsa_degrees: 27.85,
        }
    }
}

impl ChartConfig {
    /// Ephemeris directory after applying the environment override.
    pub fn ephemeris_path(&self) -> Option<PathBuf> {
        match std::env::var(EPHEMERIS_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
            _ => self.ephemeris.path.clone(),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let o = &self.observer;
        if !(-90.0..=90.0).contains(&o.latitude) {
            anyhow::bail!("observer.latitude out of range: {}", o.latitude);
        }
        if !(-180.0..=180.0).contains(&o.longitude) {
            anyhow::bail!("observer.longitude out of range: {}", o.longitude);
        }
        if o.utc_offset_minutes.abs() > 14 * 60 {
            anyhow::bail!("observer.utc_offset_minutes out of range: {}", o.utc_offset_minutes);
        }
        if !self.chart.default_ayanamsa_degrees.is_finite() {
            anyhow::bail!("chart.default_ayanamsa_degrees must be a finite number");
        }
        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse_chart_config(text: &str) -> anyhow::Result<ChartConfig> {
    let config: ChartConfig = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse chart.toml: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load `chart.toml`.
///
/// An explicit path must exist. Without one, the usual relative locations
/// are tried and built-in defaults are used when none is found.
pub fn load_chart_config(path: Option<&Path>) -> anyhow::Result<ChartConfig> {
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        return parse_chart_config(&text)
            .with_context(|| format!("Invalid config {}", path.display()));
    }
    for p in &SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return parse_chart_config(&text).with_context(|| format!("Invalid config {p}"));
        }
    }
    Ok(ChartConfig::default())
}
