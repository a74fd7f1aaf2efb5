//! Chart specifications and the per-canvas chart registry.
//!
//! Specs serialize to the JSON shape Chart.js expects, so the dashboard
//! page hands them to `new Chart(ctx, spec)` unchanged. The `ChartBoard`
//! keeps at most one live instance per canvas and destroys the old one
//! before binding a new one.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::forecast::Forecast;
use crate::types::{ConditionHistogram, DailySeries};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const ANIMATION_DURATION_MS: u64 = 2000;
const BOUNCE_EASING: &str = "easeOutBounce";

const TEMPERATURE_LABEL: &str = "Temperature (°C)";
const TEAL_FILL: &str = "rgba(75, 192, 192, 0.6)";
const TEAL_BORDER: &str = "rgba(75, 192, 192, 1)";

/// Width of the line chart's triangular point markers.
const MARKER_WIDTH_PX: u32 = 10;

const DOUGHNUT_FILLS: [&str; 5] = [
    "rgba(255, 99, 132, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(153, 102, 255, 0.6)",
];

const DOUGHNUT_BORDERS: [&str; 5] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
];

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

impl ChartKind {
    pub const ALL: &'static [ChartKind] = &[ChartKind::Bar, ChartKind::Doughnut, ChartKind::Line];

    /// Id of the canvas element the chart is drawn on.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartKind::Bar => "barChart",
            ChartKind::Doughnut => "doughnutChart",
            ChartKind::Line => "lineChart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    /// Drawn by the page once the entrance animation completes.
    #[serde(rename = "postRender", skip_serializing_if = "Option::is_none")]
    pub post_render: Option<PostRenderHook>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Colors,
    pub border_color: Colors,
    pub border_width: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    Palette(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub animation: Animation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

/// Decorative overlay with no data dependency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PostRenderHook {
    /// A right-angled triangle per point, from the x axis up to the
    /// point and `width_px` to the right.
    #[serde(rename_all = "camelCase")]
    TriangleMarkers { width_px: u32 },
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn base_options(scales: bool, easing: Option<&str>) -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: true,
        scales: scales.then(|| Scales {
            y: Axis { begin_at_zero: true },
        }),
        animation: Animation {
            duration: ANIMATION_DURATION_MS,
            easing: easing.map(str::to_string),
        },
    }
}

/// Daily temperature bars.
pub fn bar_chart(series: &DailySeries) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset {
                label: Some(TEMPERATURE_LABEL.to_string()),
                data: series.values.clone(),
                background_color: Colors::Single(TEAL_FILL.to_string()),
                border_color: Colors::Single(TEAL_BORDER.to_string()),
                border_width: 1,
                fill: false,
            }],
        },
        options: base_options(true, Some(BOUNCE_EASING)),
        post_render: None,
    }
}

/// Condition share across the whole forecast. Palette colours repeat
/// when there are more categories than colours.
pub fn doughnut_chart(histogram: &ConditionHistogram) -> ChartSpec {
    let n = histogram.len();
    let cycle = |palette: &[&str]| -> Vec<String> {
        palette.iter().cycle().take(n).map(|c| c.to_string()).collect()
    };

    ChartSpec {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: histogram.labels(),
            datasets: vec![Dataset {
                label: None,
                data: histogram.iter().map(|(_, count)| count as f64).collect(),
                background_color: Colors::Palette(cycle(&DOUGHNUT_FILLS)),
                border_color: Colors::Palette(cycle(&DOUGHNUT_BORDERS)),
                border_width: 1,
                fill: false,
            }],
        },
        options: base_options(false, Some(BOUNCE_EASING)),
        post_render: None,
    }
}

/// Filled daily temperature line with triangle markers.
pub fn line_chart(series: &DailySeries) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset {
                label: Some(TEMPERATURE_LABEL.to_string()),
                data: series.values.clone(),
                background_color: Colors::Single(TEAL_FILL.to_string()),
                border_color: Colors::Single(TEAL_BORDER.to_string()),
                border_width: 2,
                fill: true,
            }],
        },
        options: base_options(true, None),
        post_render: Some(PostRenderHook::TriangleMarkers {
            width_px: MARKER_WIDTH_PX,
        }),
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A chart bound to a canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInstance {
    pub id: u64,
    pub canvas: &'static str,
    pub spec: ChartSpec,
}

/// Live chart instances, at most one per canvas.
#[derive(Debug, Default)]
pub struct ChartBoard {
    instances: HashMap<ChartKind, ChartInstance>,
    next_id: u64,
    destroyed: u64,
}

impl ChartBoard {
    /// Destroy whatever is bound to the spec's canvas, then bind the spec.
    pub fn render(&mut self, spec: ChartSpec) -> &ChartInstance {
        let kind = spec.kind;
        self.destroy(kind);

        self.next_id += 1;
        let instance = ChartInstance {
            id: self.next_id,
            canvas: kind.canvas_id(),
            spec,
        };
        debug!(canvas = instance.canvas, id = instance.id, "Chart bound");

        self.instances.entry(kind).or_insert(instance)
    }

    /// Redraw all three charts from a forecast.
    pub fn render_forecast(&mut self, forecast: &Forecast) {
        let series = forecast.to_daily_series();
        self.render(bar_chart(&series));
        self.render(doughnut_chart(&forecast.to_histogram()));
        self.render(line_chart(&series));
    }

    pub fn destroy(&mut self, kind: ChartKind) -> Option<ChartInstance> {
        let old = self.instances.remove(&kind)?;
        self.destroyed += 1;
        debug!(canvas = old.canvas, id = old.id, destroyed = self.destroyed, "Chart destroyed");
        Some(old)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, kind: ChartKind) -> Option<&ChartInstance> {
        self.instances.get(&kind)
    }

    /// Live instances in bar, doughnut, line order.
    pub fn instances(&self) -> Vec<&ChartInstance> {
        ChartKind::ALL.iter().filter_map(|k| self.instances.get(k)).collect()
    }

    /// Total instances destroyed so far.
    #[cfg(test)]
    pub(crate) fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
