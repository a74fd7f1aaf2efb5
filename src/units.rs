//! Celsius / Fahrenheit display toggle.
//!
//! Operates on rendered temperature cells, never on forecast data.
//! Fahrenheit is shown to two decimals; converting back rounds to two
//! decimals, so a double toggle renders the original value.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Leading float in a cell, `parseFloat` style.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("leading number pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // keep "-0" out of the table
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// `20.0` → `"20 °C"`, `12.346` → `"12.35 °C"`.
pub fn format_celsius(c: f64) -> String {
    format!("{} °C", round2(c))
}

/// Always two decimals: `68.0` → `"68.00 °F"`.
pub fn format_fahrenheit(f: f64) -> String {
    format!("{f:.2} °F")
}

pub fn parse_leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Rewrite one cell into `to`. The cell is assumed to currently show the
/// other unit. `None` when the cell has no leading number.
pub fn convert_cell(text: &str, to: TemperatureUnit) -> Option<String> {
    let value = parse_leading_number(text)?;
    Some(match to {
        TemperatureUnit::Fahrenheit => format_fahrenheit(celsius_to_fahrenheit(value)),
        TemperatureUnit::Celsius => format_celsius(fahrenheit_to_celsius(value)),
    })
}

/// Unit currently shown in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitToggle {
    unit: TemperatureUnit,
}

impl UnitToggle {
    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Flip the unit and rewrite every cell. Cells without a number are
    /// left as they are.
    pub fn toggle<'a>(&mut self, cells: impl IntoIterator<Item = &'a mut String>) -> TemperatureUnit {
        self.unit = self.unit.toggled();
        for cell in cells {
            if let Some(converted) = convert_cell(cell, self.unit) {
                *cell = converted;
            }
        }
        self.unit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
