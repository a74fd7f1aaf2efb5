//! Integration tests for the OpenWeatherMap client using WireMock.
//!
//! The mock server stands in for `api.openweathermap.org`; the client is
//! pointed at it through `WeatherConfig::base_url`.

use secrecy::SecretString;
use skycast::config::WeatherConfig;
use skycast::forecast::Forecast;
use skycast::weather::openweather::OpenWeatherClient;
use skycast::weather::{Location, WeatherError, WeatherSource};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for(server: &MockServer) -> OpenWeatherClient {
    let cfg = WeatherConfig {
        base_url: format!("{}/data/2.5", server.uri()),
        timeout_secs: 5,
        ..WeatherConfig::default()
    };
    OpenWeatherClient::new(&cfg, SecretString::new("test-key".into()))
        .expect("Failed to create client")
}

fn current_body(city: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "name": city,
        "dt": 1_773_489_600,
        "main": { "temp": temp, "humidity": 71 },
        "wind": { "speed": 4.6 },
        "weather": [{ "main": "Clouds", "description": "broken clouds", "icon": "04d" }]
    })
}

fn forecast_body(temps: &[f64]) -> serde_json::Value {
    let list: Vec<_> = temps
        .iter()
        .enumerate()
        .map(|(i, t)| {
            serde_json::json!({
                "dt_txt": format!("2026-03-{:02} {:02}:00:00", 14 + i / 8, (i % 8) * 3),
                "main": { "temp": t, "humidity": 60 },
                "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }]
            })
        })
        .collect();
    serde_json::json!({ "cod": "200", "cnt": list.len(), "list": list })
}

async fn mount_ok(server: &MockServer, city: &str, temps: &[f64]) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(city, 12.5)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(temps)))
        .mount(server)
        .await;
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_fetch_parses_both_responses() {
    let server = MockServer::start().await;
    mount_ok(&server, "London", &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0]).await;

    let raw = client_for(&server)
        .fetch(&Location::City("London".into()))
        .await
        .unwrap();

    assert_eq!(raw.current.name, "London");
    assert!((raw.current.main.temp - 12.5).abs() < 1e-9);
    assert_eq!(raw.forecast.list.len(), 9);

    let forecast = Forecast::from_response(&raw.forecast).unwrap();
    assert_eq!(forecast.len(), 9);
    assert_eq!(forecast.to_daily_series().len(), 2);
}

#[tokio::test]
async fn test_fetch_sends_city_key_and_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "New York"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("New York", 5.0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "New York"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[5.0])))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client_for(&server)
        .fetch(&Location::city("  New York ").unwrap())
        .await
        .unwrap();
    assert_eq!(raw.current.name, "New York");
}

#[tokio::test]
async fn test_fetch_by_coordinates() {
    let server = MockServer::start().await;
    for endpoint in ["weather", "forecast"] {
        let body = if endpoint == "weather" {
            current_body("Paris", 18.0)
        } else {
            forecast_body(&[18.0, 19.0])
        };
        Mock::given(method("GET"))
            .and(path(format!("/data/2.5/{endpoint}")))
            .and(query_param("lat", "48.85"))
            .and(query_param("lon", "2.35"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let raw = client_for(&server)
        .fetch(&Location::coordinates(48.85, 2.35).unwrap())
        .await
        .unwrap();
    assert_eq!(raw.current.name, "Paris");
    assert_eq!(raw.forecast.list.len(), 2);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_forecast_failure_fails_whole_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", 9.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&Location::City("London".into()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WeatherError::Fetch { endpoint: "forecast", status: 500 }
    ));
}

#[tokio::test]
async fn test_unknown_city_maps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&Location::City("Atlantis".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Fetch { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch(&Location::City("London".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Decode { .. }));
}

#[tokio::test]
async fn test_invalid_location_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let blank = client.fetch(&Location::City("   ".into())).await;
    assert!(matches!(blank, Err(WeatherError::InvalidLocation(_))));

    let out_of_range = client
        .fetch(&Location::Coordinates { lat: 91.0, lon: 0.0 })
        .await;
    assert!(matches!(out_of_range, Err(WeatherError::InvalidLocation(_))));
}
