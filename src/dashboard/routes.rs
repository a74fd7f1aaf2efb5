//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<Controller>`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::charts::ChartInstance;
use crate::engine::{Controller, DashboardState};
use crate::table::RenderedTable;
use crate::types::{DashboardError, WeatherSnapshot};
use crate::weather::{Location, WeatherError};

pub type AppState = Arc<Controller>;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// `?city=Paris` or `?lat=48.85&lon=2.35`.
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl WeatherParams {
    fn location(&self) -> Result<Location, DashboardError> {
        let loc = match (self.lat, self.lon, self.city.as_deref()) {
            (Some(lat), Some(lon), _) => Location::coordinates(lat, lon)?,
            (_, _, Some(city)) => Location::city(city)?,
            _ => {
                return Err(DashboardError::InvalidInput(
                    "either city or lat and lon are required".into(),
                ))
            }
        };
        Ok(loc)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Text fields for the current-conditions panel.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeatherView {
    pub city: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub description: String,
    pub icon_url: String,
    pub background_url: String,
    pub observed_at: String,
}

impl From<&WeatherSnapshot> for CurrentWeatherView {
    fn from(s: &WeatherSnapshot) -> Self {
        Self {
            city: s.city.clone(),
            temperature: format!("Temperature: {} °C", s.temperature),
            humidity: format!("Humidity: {}%", s.humidity),
            wind_speed: format!("Wind Speed: {} km/h", s.wind_speed),
            description: format!("Weather: {}", s.description),
            icon_url: s.icon_url(),
            background_url: s.background_url().to_string(),
            observed_at: s.observed_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generation: u64,
    pub loading: bool,
    pub current: Option<CurrentWeatherView>,
    pub table: RenderedTable,
    pub charts: Vec<ChartInstance>,
}

impl From<&DashboardState> for DashboardView {
    fn from(state: &DashboardState) -> Self {
        Self {
            generation: state.generation,
            loading: state.loading,
            current: state.snapshot.as_ref().map(CurrentWeatherView::from),
            table: state.table.clone(),
            charts: state.charts.instances().into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DashboardError::InvalidInput(_)
            | DashboardError::Weather(WeatherError::InvalidLocation(_)) => StatusCode::BAD_REQUEST,
            DashboardError::Weather(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/weather
pub async fn get_weather(
    State(ctl): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<DashboardView>, ApiError> {
    let location = params.location()?;
    ctl.query(location).await?;
    let state = ctl.state().read().await;
    Ok(Json(DashboardView::from(&*state)))
}

/// GET /api/dashboard
pub async fn get_dashboard(State(ctl): State<AppState>) -> Json<DashboardView> {
    let state = ctl.state().read().await;
    Json(DashboardView::from(&*state))
}

/// GET /api/forecast
pub async fn get_forecast(
    State(ctl): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<RenderedTable> {
    let mut state = ctl.state().write().await;
    let table = match params.page {
        Some(page) => state.set_page(page).clone(),
        None => state.table.clone(),
    };
    Json(table)
}

/// POST /api/forecast/next
pub async fn next_page(State(ctl): State<AppState>) -> Json<RenderedTable> {
    let mut state = ctl.state().write().await;
    Json(state.next_page().clone())
}

/// POST /api/forecast/prev
pub async fn prev_page(State(ctl): State<AppState>) -> Json<RenderedTable> {
    let mut state = ctl.state().write().await;
    Json(state.prev_page().clone())
}

/// POST /api/units/toggle
pub async fn toggle_units(State(ctl): State<AppState>) -> Json<RenderedTable> {
    let mut state = ctl.state().write().await;
    state.toggle_units();
    Json(state.table.clone())
}

/// GET /api/charts
pub async fn get_charts(State(ctl): State<AppState>) -> Json<Vec<ChartInstance>> {
    let state = ctl.state().read().await;
    Json(state.charts.instances().into_iter().cloned().collect())
}

/// POST /api/chat
pub async fn post_chat(
    State(ctl): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = ctl.chat(&req.message).await?;
    Ok(Json(ChatReply { reply }))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
