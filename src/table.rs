//! Paginated forecast table.
//!
//! Pages are 1-based. A page index outside `1..=total_pages` is not
//! clamped: it renders as an empty page.

use serde::Serialize;

use crate::types::ForecastRow;
use crate::units::{self, TemperatureUnit};

pub const ROWS_PER_PAGE: usize = 10;

/// A window of rows plus its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPage {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub rows: Vec<ForecastRow>,
}

/// Table cells as displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub date: String,
    pub temperature: String,
    pub condition: String,
}

/// The page currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub page: usize,
    pub total_pages: usize,
    pub unit: TemperatureUnit,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn empty() -> Self {
        Self {
            page: 1,
            total_pages: 0,
            unit: TemperatureUnit::Celsius,
            rows: Vec::new(),
        }
    }

    pub fn temperature_cells_mut(&mut self) -> impl Iterator<Item = &mut String> + '_ {
        self.rows.iter_mut().map(|r| &mut r.temperature)
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Rows `[(page-1)*page_size, min(start+page_size, len))`.
pub fn paginate(rows: &[ForecastRow], page: usize, page_size: usize) -> ForecastPage {
    let window = match page.checked_sub(1) {
        Some(zero_based) if page_size > 0 => {
            let start = zero_based.saturating_mul(page_size);
            let end = start.saturating_add(page_size).min(rows.len());
            rows.get(start..end).unwrap_or_default()
        }
        _ => &[],
    };

    ForecastPage {
        page,
        total_pages: total_pages(rows.len(), page_size),
        page_size,
        rows: window.to_vec(),
    }
}

/// Render a page in the given unit. Celsius cells are formatted first;
/// Fahrenheit goes through the same conversion as the toggle so both
/// paths produce identical text.
pub fn render(page: &ForecastPage, unit: TemperatureUnit) -> RenderedTable {
    let mut table = RenderedTable {
        page: page.page,
        total_pages: page.total_pages,
        unit,
        rows: page
            .rows
            .iter()
            .map(|r| RenderedRow {
                date: r.date.clone(),
                temperature: units::format_celsius(r.temperature),
                condition: r.condition.clone(),
            })
            .collect(),
    };

    if unit == TemperatureUnit::Fahrenheit {
        for cell in table.temperature_cells_mut() {
            if let Some(converted) = units::convert_cell(cell, TemperatureUnit::Fahrenheit) {
                *cell = converted;
            }
        }
    }
    table
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
