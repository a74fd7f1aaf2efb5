//! End-to-end dashboard flow.
//!
//! Drives the HTTP router against a deterministic in-memory weather
//! source: search, paginate, toggle units, inspect charts, and chat.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use skycast::chat;
use skycast::dashboard::build_router;
use skycast::engine::{Controller, ControllerSettings};
use skycast::weather::models::{CurrentResponse, ForecastResponse};
use skycast::weather::{Location, RawWeather, WeatherError, WeatherSource};

// =============================================================================
// Stub source
// =============================================================================

/// Weather source serving canned forecasts keyed by city name.
///
/// Unknown cities answer with HTTP 404, like the real provider.
#[derive(Default)]
struct StubSource {
    cities: HashMap<String, Vec<f64>>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    fn with_city(mut self, city: &str, temps: &[f64]) -> Self {
        self.cities.insert(city.to_string(), temps.to_vec());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn raw(city: &str, temps: &[f64]) -> RawWeather {
        let list: Vec<_> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| {
                serde_json::json!({
                    "dt_txt": format!("2026-03-{:02} {:02}:00:00", 14 + i / 8, (i % 8) * 3),
                    "main": { "temp": t },
                    "weather": [{ "main": if i % 2 == 0 { "Clear" } else { "Rain" }, "description": "mixed" }]
                })
            })
            .collect();

        RawWeather {
            current: serde_json::from_value::<CurrentResponse>(serde_json::json!({
                "name": city,
                "main": { "temp": temps.first().copied().unwrap_or(0.0), "humidity": 55 },
                "wind": { "speed": 3.5 },
                "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }]
            }))
            .unwrap(),
            forecast: serde_json::from_value::<ForecastResponse>(serde_json::json!({ "list": list }))
                .unwrap(),
        }
    }
}

#[async_trait]
impl WeatherSource for StubSource {
    async fn fetch(&self, location: &Location) -> Result<RawWeather, WeatherError> {
        location.validate()?;
        let key = location.to_string();
        self.calls.lock().unwrap().push(key.clone());
        match self.cities.get(&key) {
            Some(temps) => Ok(Self::raw(&key, temps)),
            None => Err(WeatherError::Fetch { endpoint: "weather", status: 404 }),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app(source: Arc<StubSource>) -> Router {
    let controller = Controller::new(source, None, ControllerSettings::default());
    build_router(Arc::new(controller))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn chat_reply(app: &Router, message: &str) -> String {
    let body = serde_json::json!({ "message": message }).to_string();
    let (status, json) = send(app, "POST", "/api/chat", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    json["reply"].as_str().unwrap().to_string()
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn test_search_single_entry_forecast() {
    let source = Arc::new(StubSource::default().with_city("Paris", &[20.0]));
    let app = app(source.clone());

    let (status, view) = send(&app, "GET", "/api/weather?city=Paris", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["generation"], 1);
    assert_eq!(view["loading"], false);
    assert_eq!(view["current"]["city"], "Paris");
    assert_eq!(view["current"]["temperature"], "Temperature: 20 °C");
    assert_eq!(view["current"]["humidity"], "Humidity: 55%");
    assert_eq!(view["table"]["total_pages"], 1);
    assert_eq!(view["table"]["rows"][0]["date"], "2026-03-14");
    assert_eq!(view["table"]["rows"][0]["temperature"], "20 °C");

    let charts = view["charts"].as_array().unwrap();
    assert_eq!(charts.len(), 3);
    assert_eq!(charts[0]["spec"]["data"]["labels"].as_array().unwrap().len(), 1);

    assert_eq!(source.calls(), vec!["Paris".to_string()]);
}

#[tokio::test]
async fn test_paginate_and_toggle_units() {
    let temps: Vec<f64> = (0..25).map(|i| i as f64).collect();
    let source = Arc::new(StubSource::default().with_city("Rome", &temps));
    let app = app(source);

    send(&app, "GET", "/api/weather?city=Rome", None).await;

    let (_, page) = send(&app, "GET", "/api/forecast", None).await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["rows"].as_array().unwrap().len(), 10);

    send(&app, "POST", "/api/forecast/next", None).await;
    let (_, last) = send(&app, "POST", "/api/forecast/next", None).await;
    assert_eq!(last["page"], 3);
    assert_eq!(last["rows"].as_array().unwrap().len(), 5);

    let (_, still_last) = send(&app, "POST", "/api/forecast/next", None).await;
    assert_eq!(still_last["page"], 3);

    let (_, toggled) = send(&app, "POST", "/api/units/toggle", None).await;
    assert_eq!(toggled["unit"], "fahrenheit");
    // row 21 of 25 holds 20 °C
    assert_eq!(toggled["rows"][0]["temperature"], "68.00 °F");

    let (_, back) = send(&app, "POST", "/api/units/toggle", None).await;
    assert_eq!(back["unit"], "celsius");
    assert_eq!(back["rows"][0]["temperature"], "20 °C");

    let (_, empty) = send(&app, "GET", "/api/forecast?page=0", None).await;
    assert!(empty["rows"].as_array().unwrap().is_empty());

    let (_, charts) = send(&app, "GET", "/api/charts", None).await;
    let charts = charts.as_array().unwrap();
    let canvases: Vec<_> = charts.iter().map(|c| c["canvas"].as_str().unwrap()).collect();
    assert_eq!(canvases, vec!["barChart", "doughnutChart", "lineChart"]);
    // one sample per day at a stride of 8
    assert_eq!(charts[0]["spec"]["data"]["labels"].as_array().unwrap().len(), 4);
    assert_eq!(charts[2]["spec"]["postRender"]["kind"], "triangleMarkers");
}

#[tokio::test]
async fn test_chat_statistics_and_lookups() {
    let source = Arc::new(
        StubSource::default()
            .with_city("London", &[10.0, 20.0, 30.0])
            .with_city("Rome", &[25.0]),
    );
    let app = app(source.clone());

    assert_eq!(
        chat_reply(&app, "What is the average temperature?").await,
        chat::NO_FORECAST
    );

    send(&app, "GET", "/api/weather?city=London", None).await;
    assert_eq!(
        chat_reply(&app, "What is the average temperature?").await,
        "The average temperature this week is 20.00 °C."
    );
    assert_eq!(
        chat_reply(&app, "highest temperature please").await,
        "The highest temperature this week is 30 °C."
    );
    assert_eq!(
        chat_reply(&app, "lowest temperature").await,
        "The lowest temperature this week is 10 °C."
    );

    let reply = chat_reply(&app, "What's the weather in Rome").await;
    assert!(reply.starts_with("The weather in Rome is clear sky"));

    let (_, view) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(view["current"]["city"], "Rome");
    assert_eq!(view["generation"], 2);

    assert_eq!(
        chat_reply(&app, "forecast for Atlantis").await,
        chat::LOOKUP_FAILED
    );
    let (_, view) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(view["current"]["city"], "Rome");
    assert_eq!(view["loading"], false);

    assert_eq!(chat_reply(&app, "tell me a joke").await, chat::NOT_UNDERSTOOD);

    assert_eq!(
        source.calls(),
        vec!["London".to_string(), "Rome".to_string(), "Atlantis".to_string()]
    );
}

#[tokio::test]
async fn test_failed_search_keeps_previous_view() {
    let source = Arc::new(StubSource::default().with_city("Paris", &[20.0]));
    let app = app(source);

    send(&app, "GET", "/api/weather?city=Paris", None).await;

    let (status, err) = send(&app, "GET", "/api/weather?city=Nowhere", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(err["error"].as_str().unwrap().contains("404"));

    let (status, _) = send(&app, "GET", "/api/weather?city=%20%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, view) = send(&app, "GET", "/api/dashboard", None).await;
    assert_eq!(view["current"]["city"], "Paris");
    assert_eq!(view["generation"], 1);
    assert_eq!(view["loading"], false);
}
