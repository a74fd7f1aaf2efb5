//! Shared types for the SKYCAST dashboard.
//!
//! These types form the data model used across all modules. Fetched
//! values are immutable once built; the controller replaces them
//! wholesale on every new query.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::weather::WeatherError;

// ---------------------------------------------------------------------------
// Condition category
// ---------------------------------------------------------------------------

/// Coarse weather category derived from the provider's `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Default,
}

impl ConditionCategory {
    /// All known categories (useful for iteration).
    pub const ALL: &'static [ConditionCategory] = &[
        ConditionCategory::Clear,
        ConditionCategory::Clouds,
        ConditionCategory::Rain,
        ConditionCategory::Drizzle,
        ConditionCategory::Thunderstorm,
        ConditionCategory::Snow,
        ConditionCategory::Default,
    ];

    /// Map a provider condition name onto a category. Anything the
    /// provider reports outside the six named groups (Mist, Haze, Fog, ...)
    /// lands in `Default`.
    pub fn from_main(main: &str) -> Self {
        match main.trim().to_lowercase().as_str() {
            "clear" => ConditionCategory::Clear,
            "clouds" => ConditionCategory::Clouds,
            "rain" => ConditionCategory::Rain,
            "drizzle" => ConditionCategory::Drizzle,
            "thunderstorm" => ConditionCategory::Thunderstorm,
            "snow" => ConditionCategory::Snow,
            _ => ConditionCategory::Default,
        }
    }

    /// Background image shown behind the current-conditions panel.
    pub fn background_url(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "https://cdn.pixabay.com/photo/2019/10/14/16/03/sky-4556591_960_720.jpg",
            ConditionCategory::Clouds => "https://cdn.pixabay.com/photo/2016/12/20/12/33/clouds-1915011_960_720.jpg",
            ConditionCategory::Rain => "https://cdn.pixabay.com/photo/2020/01/16/20/39/rain-4772062_960_720.jpg",
            ConditionCategory::Drizzle => "https://cdn.pixabay.com/photo/2016/11/18/16/08/drizzle-1838539_960_720.jpg",
            ConditionCategory::Thunderstorm => "https://cdn.pixabay.com/photo/2015/03/26/09/44/storm-690134_960_720.jpg",
            ConditionCategory::Snow => "https://cdn.pixabay.com/photo/2014/12/15/13/40/snowfall-569202_960_720.jpg",
            ConditionCategory::Default => "https://cdn.pixabay.com/photo/2022/01/05/15/42/sky-6917375_960_720.jpg",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionCategory::Clear => write!(f, "Clear"),
            ConditionCategory::Clouds => write!(f, "Clouds"),
            ConditionCategory::Rain => write!(f, "Rain"),
            ConditionCategory::Drizzle => write!(f, "Drizzle"),
            ConditionCategory::Thunderstorm => write!(f, "Thunderstorm"),
            ConditionCategory::Snow => write!(f, "Snow"),
            ConditionCategory::Default => write!(f, "Default"),
        }
    }
}

// ---------------------------------------------------------------------------
// Current conditions
// ---------------------------------------------------------------------------

/// Current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    pub wind_speed: f64,
    /// Free-text condition, e.g. "scattered clouds"
    pub description: String,
    /// Provider condition name, e.g. "Clouds"
    pub condition: String,
    pub category: ConditionCategory,
    /// Provider icon id, e.g. "03d"
    pub icon: String,
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn icon_url(&self) -> String {
        format!("http://openweathermap.org/img/wn/{}.png", self.icon)
    }

    pub fn background_url(&self) -> &'static str {
        self.category.background_url()
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} °C, {}% humidity, {} km/h wind, {}",
            self.city, self.temperature, self.humidity, self.wind_speed, self.description,
        )
    }
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// One 3-hour sample from the five-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    /// Temperature in °C
    pub temperature: f64,
    pub description: String,
    pub category: ConditionCategory,
}

impl ForecastEntry {
    /// Provider timestamp format for `dt_txt`.
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Day label used by table rows and chart axes.
    pub fn date_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// A display-ready forecast row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: String,
    pub temperature: f64,
    pub condition: String,
}

/// Once-per-day samples of the forecast, as parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn push(&mut self, label: String, value: f64) {
        self.labels.push(label);
        self.values.push(value);
    }
}

/// Occurrences per condition category, ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConditionHistogram {
    buckets: Vec<(ConditionCategory, usize)>,
}

impl ConditionHistogram {
    pub fn record(&mut self, category: ConditionCategory) {
        match self.buckets.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => self.buckets.push((category, 1)),
        }
    }

    pub fn count(&self, category: ConditionCategory) -> usize {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct categories seen.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConditionCategory, usize)> + '_ {
        self.buckets.iter().copied()
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|(c, _)| c.to_string()).collect()
    }
}

/// Min / max / mean over the loaded forecast temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Top-level error surfaced by the controller.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
