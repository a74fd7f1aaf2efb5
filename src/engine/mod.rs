//! Dashboard engine — explicit state plus the controller that owns it.

pub mod controller;
pub mod state;

pub use controller::{Controller, ControllerSettings, QueryOutcome};
pub use state::DashboardState;
