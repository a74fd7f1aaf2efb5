//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a missing section or an empty file is
//! valid. Secrets (API keys) are referenced by env-var name in the config
//! and resolved at runtime.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;

use crate::weather::Location;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    /// Location fetched once at startup, if any.
    #[serde(default)]
    pub startup: Option<StartupConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_weather_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_assistant_url")]
    pub url: String,
    /// Bearer token env var; requests go out unauthenticated when unset.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// City used for weather questions that don't name one.
    #[serde(default = "default_city")]
    pub default_city: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StartupConfig {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_weather_timeout() -> u64 {
    15
}

fn default_assistant_url() -> String {
    "https://api.geminiapi.com/v1/assistant".to_string()
}

const fn default_assistant_timeout() -> u64 {
    30
}

const fn default_port() -> u16 {
    8080
}

const fn default_rows_per_page() -> usize {
    10
}

fn default_city() -> String {
    "London".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key_env: default_weather_key_env(),
            units: default_units(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_assistant_url(),
            api_key_env: None,
            timeout_secs: default_assistant_timeout(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
        }
    }
}

impl StartupConfig {
    /// Coordinates win over a city name when both are set.
    pub fn location(&self) -> Option<Location> {
        match (self.lat, self.lon, self.city.as_deref()) {
            (Some(lat), Some(lon), _) => Location::coordinates(lat, lon).ok(),
            (_, _, Some(city)) => Location::city(city).ok(),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.dashboard.rows_per_page == 0 {
            anyhow::bail!("dashboard.rows_per_page must be at least 1");
        }
        Ok(config)
    }

    /// Resolve an environment variable name to its value.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }

    /// Resolve an environment variable holding a secret.
    pub fn resolve_secret(env_name: &str) -> Result<SecretString> {
        Self::resolve_env(env_name).map(SecretString::new)
    }
}
