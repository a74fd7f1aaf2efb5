//! Forecast reshaping.
//!
//! Turns the provider's 3-hour forecast list into the shapes the views
//! need: table rows, a once-per-day series for the bar and line charts,
//! and a condition histogram for the doughnut chart.

use serde::Serialize;

use crate::types::{
    ConditionHistogram, DailySeries, ForecastEntry, ForecastRow, TemperatureStats,
};
use crate::weather::models::ForecastResponse;
use crate::weather::WeatherError;

/// 8 × 3h = one sample per 24h.
pub const DAILY_STRIDE: usize = 8;

/// A loaded forecast. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn new(entries: Vec<ForecastEntry>) -> Self {
        Self { entries }
    }

    /// Decode every item of a provider response. One bad timestamp fails
    /// the whole forecast.
    pub fn from_response(resp: &ForecastResponse) -> Result<Self, WeatherError> {
        let entries = resp
            .list
            .iter()
            .map(|item| item.to_entry())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One display row per entry, order preserved.
    pub fn to_rows(&self) -> Vec<ForecastRow> {
        self.entries
            .iter()
            .map(|e| ForecastRow {
                date: e.date_label(),
                temperature: e.temperature,
                condition: e.description.clone(),
            })
            .collect()
    }

    /// Entries at indices 0, 8, 16, ... as parallel label/value sequences.
    pub fn to_daily_series(&self) -> DailySeries {
        let mut series = DailySeries::default();
        for entry in self.entries.iter().step_by(DAILY_STRIDE) {
            series.push(entry.date_label(), entry.temperature);
        }
        series
    }

    /// Category counts over the full, unsampled list.
    pub fn to_histogram(&self) -> ConditionHistogram {
        let mut histogram = ConditionHistogram::default();
        for entry in &self.entries {
            histogram.record(entry.category);
        }
        histogram
    }

    /// `None` when nothing is loaded.
    pub fn temperature_stats(&self) -> Option<TemperatureStats> {
        let first = self.entries.first()?.temperature;
        let (min, max, sum) = self.entries.iter().fold(
            (first, first, 0.0),
            |(min, max, sum), e| (min.min(e.temperature), max.max(e.temperature), sum + e.temperature),
        );
        Some(TemperatureStats {
            min,
            max,
            mean: sum / self.entries.len() as f64,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
