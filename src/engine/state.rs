//! Dashboard state.
//!
//! Everything the views show lives here, owned by the controller. A
//! successful query replaces the snapshot, forecast, rows and charts in
//! one step; pagination and unit toggling only touch the rendered table.

use crate::charts::ChartBoard;
use crate::forecast::Forecast;
use crate::table::{self, RenderedTable};
use crate::types::{ForecastRow, WeatherSnapshot};
use crate::units::{TemperatureUnit, UnitToggle};

#[derive(Debug)]
pub struct DashboardState {
    pub snapshot: Option<WeatherSnapshot>,
    pub forecast: Forecast,
    pub rows: Vec<ForecastRow>,
    pub current_page: usize,
    pub page_size: usize,
    pub charts: ChartBoard,
    pub units: UnitToggle,
    /// The table page as currently displayed.
    pub table: RenderedTable,
    pub loading: bool,
    /// Generation of the query whose data is on display; 0 before any.
    pub generation: u64,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            snapshot: None,
            forecast: Forecast::default(),
            rows: Vec::new(),
            current_page: 1,
            page_size,
            charts: ChartBoard::default(),
            units: UnitToggle::default(),
            table: RenderedTable::empty(),
            loading: false,
            generation: 0,
        }
    }

    /// Replace all fetched data and redraw every view.
    pub fn apply(&mut self, generation: u64, snapshot: WeatherSnapshot, forecast: Forecast) {
        self.rows = forecast.to_rows();
        self.charts.render_forecast(&forecast);
        self.forecast = forecast;
        self.snapshot = Some(snapshot);
        self.current_page = 1;
        self.generation = generation;
        self.render_table();
    }

    fn render_table(&mut self) {
        let page = table::paginate(&self.rows, self.current_page, self.page_size);
        self.table = table::render(&page, self.units.unit());
    }

    pub fn total_pages(&self) -> usize {
        table::total_pages(self.rows.len(), self.page_size)
    }

    /// Show a page. Out-of-range pages render empty.
    pub fn set_page(&mut self, page: usize) -> &RenderedTable {
        self.current_page = page;
        self.render_table();
        &self.table
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) -> &RenderedTable {
        let target = self.current_page.saturating_add(1).min(self.total_pages().max(1));
        self.set_page(target)
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&mut self) -> &RenderedTable {
        let target = self.current_page.saturating_sub(1).max(1);
        self.set_page(target)
    }

    /// Flip °C/°F on the displayed cells.
    pub fn toggle_units(&mut self) -> TemperatureUnit {
        let unit = self.units.toggle(self.table.temperature_cells_mut());
        self.table.unit = unit;
        unit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
