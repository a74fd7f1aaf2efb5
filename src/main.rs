//! SKYCAST — weather dashboard server
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires the weather and assistant clients into the controller, and
//! serves the dashboard until Ctrl-C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use skycast::config::{self, AppConfig};
use skycast::dashboard;
use skycast::engine::{Controller, ControllerSettings};
use skycast::llm::remote::RemoteAssistant;
use skycast::llm::Assistant;
use skycast::weather::openweather::OpenWeatherClient;

const BANNER: &str = r#"
 ____  _  ____   ______    _    ____ _____
/ ___|| |/ /\ \ / / ___|  / \  / ___|_   _|
\___ \| ' /  \ V / |     / _ \ \___ \ | |
 ___) | . \   | || |___ / ___ \ ___) || |
|____/|_|\_\  |_| \____/_/   \_\____/ |_|

  Weather dashboard v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("SKYCAST_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = config::AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        port = cfg.dashboard.port,
        rows_per_page = cfg.dashboard.rows_per_page,
        assistant = cfg.assistant.enabled,
        "SKYCAST starting up"
    );

    // -- Initialise components -------------------------------------------

    let weather_key = AppConfig::resolve_secret(&cfg.weather.api_key_env)?;
    let source = Arc::new(OpenWeatherClient::new(&cfg.weather, weather_key)?);

    let assistant: Option<Arc<dyn Assistant>> = if cfg.assistant.enabled {
        let key = cfg
            .assistant
            .api_key_env
            .as_deref()
            .and_then(|env| AppConfig::resolve_secret(env).ok());
        if key.is_none() {
            warn!("No assistant API key configured, sending unauthenticated requests");
        }
        Some(Arc::new(RemoteAssistant::new(&cfg.assistant, key)?))
    } else {
        info!("Assistant disabled, freeform chat questions will not be answered");
        None
    };

    let controller = Arc::new(Controller::new(
        source,
        assistant,
        ControllerSettings {
            page_size: cfg.dashboard.rows_per_page,
            default_city: cfg.chat.default_city.clone(),
        },
    ));

    // -- Initial query ---------------------------------------------------

    if let Some(location) = cfg.startup.as_ref().and_then(|s| s.location()) {
        match controller.query(location.clone()).await {
            Ok(outcome) => info!(
                location = %location,
                city = %outcome.snapshot.city,
                "Startup weather loaded"
            ),
            Err(e) => warn!(location = %location, error = %e, "Startup weather query failed"),
        }
    }

    // -- Serve -----------------------------------------------------------

    dashboard::serve(controller, cfg.dashboard.port, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C, shutting down");
    })
    .await?;

    info!("SKYCAST shut down cleanly");
    Ok(())
}

/// Initialise tracing with env-filter and optional JSON output.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skycast=info"));

    if std::env::var("SKYCAST_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
