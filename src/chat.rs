//! Chat intent classification and canned answers.
//!
//! `classify` is stateless. Checks run in this order and the first hit
//! wins:
//!
//! 1. "highest temperature"
//! 2. "lowest temperature"
//! 3. "average temperature"
//! 4. the word "weather" or "forecast" (city after in/at/for)
//! 5. anything else goes to the remote assistant

use regex::Regex;
use std::sync::LazyLock;

use crate::forecast::Forecast;
use crate::types::WeatherSnapshot;
use crate::units::format_celsius;

static WEATHER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(weather|forecast)\b").expect("weather pattern is valid")
});

static CITY_AFTER_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(in|at|for)\s+([a-zA-Z\s]+)\b").expect("city pattern is valid")
});

pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that.";
pub const ASSISTANT_FAILED: &str = "An error occurred while processing your query.";
pub const LOOKUP_FAILED: &str = "Sorry, I couldn't fetch the weather information.";
pub const NO_FORECAST: &str = "No forecast is loaded yet. Search for a city first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Highest,
    Lowest,
    Average,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatIntent {
    Stat(StatKind),
    WeatherLookup(String),
    Freeform(String),
}

pub fn classify(query: &str, default_city: &str) -> ChatIntent {
    let lower = query.to_lowercase();

    if lower.contains("highest temperature") {
        return ChatIntent::Stat(StatKind::Highest);
    }
    if lower.contains("lowest temperature") {
        return ChatIntent::Stat(StatKind::Lowest);
    }
    if lower.contains("average temperature") {
        return ChatIntent::Stat(StatKind::Average);
    }

    if WEATHER_WORD.is_match(query) {
        let city = extract_city(query).unwrap_or_else(|| default_city.to_string());
        return ChatIntent::WeatherLookup(city);
    }

    ChatIntent::Freeform(query.trim().to_string())
}

/// The letters-and-spaces run following the first "in", "at" or "for".
pub fn extract_city(query: &str) -> Option<String> {
    CITY_AFTER_PREPOSITION
        .captures(query)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|city| !city.is_empty())
}

pub fn answer_stat(kind: StatKind, forecast: &Forecast) -> String {
    let Some(stats) = forecast.temperature_stats() else {
        return NO_FORECAST.to_string();
    };

    match kind {
        StatKind::Highest => format!(
            "The highest temperature this week is {}.",
            format_celsius(stats.max)
        ),
        StatKind::Lowest => format!(
            "The lowest temperature this week is {}.",
            format_celsius(stats.min)
        ),
        StatKind::Average => format!(
            "The average temperature this week is {:.2} °C.",
            stats.mean
        ),
    }
}

pub fn describe_weather(snapshot: &WeatherSnapshot) -> String {
    format!(
        "The weather in {} is {} with a temperature of {} °C, humidity of {}%, and wind speed of {} km/h.",
        snapshot.city, snapshot.description, snapshot.temperature, snapshot.humidity, snapshot.wind_speed,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
