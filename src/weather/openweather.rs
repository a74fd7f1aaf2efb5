//! OpenWeatherMap client.
//!
//! API: `https://api.openweathermap.org/data/2.5/{weather,forecast}`
//! Auth: `appid` query parameter.
//! Units are requested as metric so temperatures arrive in °C.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::models::{CurrentResponse, ForecastResponse};
use super::{Location, RawWeather, WeatherError, WeatherSource};
use crate::config::WeatherConfig;

pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig, api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent("SKYCAST/0.1.0")
            .build()
            .context("Failed to build weather HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            units: config.units.clone(),
        })
    }

    fn endpoint_url(&self, endpoint: &str, location: &Location) -> String {
        format!(
            "{}/{endpoint}?{}&appid={}&units={}",
            self.base_url,
            location.query_params(),
            urlencoding::encode(self.api_key.expose_secret()),
            self.units,
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        location: &Location,
    ) -> Result<T, WeatherError> {
        let url = self.endpoint_url(endpoint, location);

        let resp = self.http.get(&url).send().await.map_err(|e| WeatherError::Request {
            endpoint,
            message: e.without_url().to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Fetch {
                endpoint,
                status: status.as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|e| WeatherError::Decode {
            endpoint,
            message: e.without_url().to_string(),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip_all, fields(location = %location))]
    async fn fetch(&self, location: &Location) -> Result<RawWeather, WeatherError> {
        location.validate()?;

        // Both futures exist before either is polled; try_join drives them
        // together and drops the survivor on the first error.
        let current = self.get_json::<CurrentResponse>("weather", location);
        let forecast = self.get_json::<ForecastResponse>("forecast", location);
        let (current, forecast) = futures::try_join!(current, forecast)?;

        debug!(
            city = %current.name,
            forecast_entries = forecast.list.len(),
            "Weather fetched"
        );

        Ok(RawWeather { current, forecast })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
