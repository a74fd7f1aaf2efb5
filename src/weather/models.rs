//! OpenWeatherMap response types and their conversion into domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WeatherError;
use crate::types::{ConditionCategory, ForecastEntry, WeatherSnapshot};

// ---------------------------------------------------------------------------
// Shared blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MainBlock {
    pub temp: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WindBlock {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConditionBlock {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

// ---------------------------------------------------------------------------
// GET /weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrentResponse {
    #[serde(default)]
    pub name: String,
    pub main: MainBlock,
    #[serde(default)]
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
    /// Observation time, unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
}

impl CurrentResponse {
    /// Convert to a snapshot. `fetched_at` stands in when the provider
    /// omits the observation time.
    pub fn to_snapshot(&self, fetched_at: DateTime<Utc>) -> WeatherSnapshot {
        let condition = self.weather.first().cloned().unwrap_or_default();
        let observed_at = self
            .dt
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or(fetched_at);

        WeatherSnapshot {
            city: self.name.clone(),
            temperature: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            description: condition.description,
            category: ConditionCategory::from_main(&condition.main),
            condition: condition.main,
            icon: condition.icon,
            observed_at,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastItem {
    pub dt_txt: String,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

impl ForecastItem {
    pub fn to_entry(&self) -> Result<ForecastEntry, WeatherError> {
        let timestamp = NaiveDateTime::parse_from_str(&self.dt_txt, ForecastEntry::TIMESTAMP_FORMAT)
            .map_err(|e| WeatherError::Decode {
                endpoint: "forecast",
                message: format!("invalid dt_txt {:?}: {e}", self.dt_txt),
            })?;
        let condition = self.weather.first().cloned().unwrap_or_default();

        Ok(ForecastEntry {
            timestamp,
            temperature: self.main.temp,
            description: condition.description,
            category: ConditionCategory::from_main(&condition.main),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
