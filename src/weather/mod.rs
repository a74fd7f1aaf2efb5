//! Weather data client.
//!
//! Defines the `WeatherSource` trait and the OpenWeatherMap
//! implementation. A query always issues both the current-conditions and
//! the forecast request; the pair succeeds or fails as a unit.

pub mod models;
pub mod openweather;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use models::{CurrentResponse, ForecastResponse};

/// Weather client errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("{endpoint} request returned HTTP {status}")]
    Fetch { endpoint: &'static str, status: u16 },

    #[error("{endpoint} request failed: {message}")]
    Request { endpoint: &'static str, message: String },

    #[error("Failed to decode {endpoint} response: {message}")]
    Decode { endpoint: &'static str, message: String },
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// What to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Build a validated city location. Surrounding whitespace is trimmed.
    pub fn city(name: &str) -> Result<Self, WeatherError> {
        let loc = Location::City(name.trim().to_string());
        loc.validate()?;
        Ok(loc)
    }

    /// Build a validated coordinate location.
    pub fn coordinates(lat: f64, lon: f64) -> Result<Self, WeatherError> {
        let loc = Location::Coordinates { lat, lon };
        loc.validate()?;
        Ok(loc)
    }

    pub fn validate(&self) -> Result<(), WeatherError> {
        match self {
            Location::City(name) if name.trim().is_empty() => Err(WeatherError::InvalidLocation(
                "city name must not be empty".into(),
            )),
            Location::City(_) => Ok(()),
            Location::Coordinates { lat, lon } => {
                if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) {
                    return Err(WeatherError::InvalidLocation(format!(
                        "latitude must be -90 to 90 and longitude -180 to 180, got ({lat}, {lon})"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Provider query parameters selecting this location.
    pub fn query_params(&self) -> String {
        match self {
            Location::City(name) => format!("q={}", urlencoding::encode(name.trim())),
            Location::Coordinates { lat, lon } => format!("lat={lat}&lon={lon}"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::City(name) => write!(f, "{name}"),
            Location::Coordinates { lat, lon } => write!(f, "({lat:.4}, {lon:.4})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Untransformed provider payloads for one query.
#[derive(Debug, Clone)]
pub struct RawWeather {
    pub current: CurrentResponse,
    pub forecast: ForecastResponse,
}

/// Abstraction over the weather provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current conditions and the forecast for a location.
    ///
    /// Both requests are in flight at the same time; if either fails the
    /// whole call fails.
    async fn fetch(&self, location: &Location) -> Result<RawWeather, WeatherError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
