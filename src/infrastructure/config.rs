use crate::domain::units::DisplayUnit;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct NightscoutConfig {
    pub nightscout: NightscoutSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NightscoutSettings {
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Chart defaults; each can be overridden per request via query parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_hours")]
    pub hours: i32,
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
    #[serde(default = "default_prediction_enabled")]
    pub prediction_enabled: bool,
}

fn default_unit() -> String {
    "mgdl".to_string()
}

fn default_hours() -> i32 {
    6
}

fn default_poll_seconds() -> u64 {
    30
}

fn default_prediction_enabled() -> bool {
    true
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            hours: default_hours(),
            poll_seconds: default_poll_seconds(),
            prediction_enabled: default_prediction_enabled(),
        }
    }
}

impl ChartConfig {
    pub fn display_unit(&self) -> DisplayUnit {
        DisplayUnit::parse(&self.unit).unwrap_or_else(|| {
            tracing::warn!("Unrecognized display unit '{}', using mg/dL", self.unit);
            DisplayUnit::MilligramsPerDeciliter
        })
    }
}

pub fn load_nightscout_config() -> anyhow::Result<NightscoutConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/nightscout"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_chart_config() -> anyhow::Result<ChartConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/chart").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
