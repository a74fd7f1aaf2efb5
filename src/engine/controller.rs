//! Dashboard controller.
//!
//! Owns the dashboard state and the outbound clients. Every query takes
//! a generation number; only the newest generation may write its result
//! into the state, so a slow response can never overwrite a newer one.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::state::DashboardState;
use crate::chat::{self, ChatIntent};
use crate::forecast::Forecast;
use crate::llm::Assistant;
use crate::types::{DashboardError, WeatherSnapshot};
use crate::weather::{Location, WeatherSource};

/// Result of a completed weather query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub generation: u64,
    pub snapshot: WeatherSnapshot,
    /// False when a newer query was issued while this one was in flight;
    /// the data was discarded.
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub page_size: usize,
    pub default_city: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: crate::table::ROWS_PER_PAGE,
            default_city: "London".to_string(),
        }
    }
}

pub struct Controller {
    source: Arc<dyn WeatherSource>,
    assistant: Option<Arc<dyn Assistant>>,
    default_city: String,
    generation: AtomicU64,
    state: RwLock<DashboardState>,
}

impl Controller {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        assistant: Option<Arc<dyn Assistant>>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            source,
            assistant,
            default_city: settings.default_city,
            generation: AtomicU64::new(0),
            state: RwLock::new(DashboardState::new(settings.page_size)),
        }
    }

    pub fn state(&self) -> &RwLock<DashboardState> {
        &self.state
    }

    /// Generation of the most recently issued query.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch and display weather for a location.
    ///
    /// On failure nothing but the loading flag changes. On success the
    /// state is replaced only if no newer query has been issued since.
    pub async fn query(&self, location: Location) -> Result<QueryOutcome, DashboardError> {
        location.validate()?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;
        info!(generation, location = %location, "Weather query issued");

        // Decode fully before touching state so a bad forecast can't leave
        // a half-updated view behind.
        let fetched = self
            .source
            .fetch(&location)
            .await
            .and_then(|raw| {
                let snapshot = raw.current.to_snapshot(Utc::now());
                let forecast = Forecast::from_response(&raw.forecast)?;
                Ok((snapshot, forecast))
            });

        let mut state = self.state.write().await;
        let latest = self.latest_generation();
        if generation == latest {
            state.loading = false;
        }

        match fetched {
            Err(e) => {
                error!(generation, location = %location, error = %e, "Error fetching weather data");
                Err(e.into())
            }
            Ok((snapshot, _)) if generation != latest => {
                warn!(generation, latest, city = %snapshot.city, "Discarding stale weather response");
                Ok(QueryOutcome {
                    generation,
                    snapshot,
                    applied: false,
                })
            }
            Ok((snapshot, forecast)) => {
                info!(
                    generation,
                    city = %snapshot.city,
                    entries = forecast.len(),
                    "Weather applied"
                );
                state.apply(generation, snapshot.clone(), forecast);
                Ok(QueryOutcome {
                    generation,
                    snapshot,
                    applied: true,
                })
            }
        }
    }

    /// Answer a chat message.
    pub async fn chat(&self, message: &str) -> Result<String, DashboardError> {
        if message.trim().is_empty() {
            return Err(DashboardError::InvalidInput("message must not be empty".into()));
        }

        let intent = chat::classify(message, &self.default_city);
        debug!(?intent, "Chat intent");

        let reply = match intent {
            ChatIntent::Stat(kind) => {
                let state = self.state.read().await;
                chat::answer_stat(kind, &state.forecast)
            }
            ChatIntent::WeatherLookup(city) => match Location::city(&city) {
                Ok(location) => match self.query(location).await {
                    Ok(outcome) => chat::describe_weather(&outcome.snapshot),
                    Err(_) => chat::LOOKUP_FAILED.to_string(),
                },
                Err(_) => chat::LOOKUP_FAILED.to_string(),
            },
            ChatIntent::Freeform(text) => self.ask_assistant(&text).await,
        };

        Ok(reply)
    }

    async fn ask_assistant(&self, text: &str) -> String {
        let Some(assistant) = &self.assistant else {
            return chat::NOT_UNDERSTOOD.to_string();
        };

        match assistant.ask(text).await {
            Ok(Some(answer)) => answer,
            Ok(None) => chat::NOT_UNDERSTOOD.to_string(),
            Err(e) => {
                warn!(error = %e, "Assistant call failed");
                chat::ASSISTANT_FAILED.to_string()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
