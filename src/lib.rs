//! SKYCAST — weather dashboard
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod weather;
pub mod forecast;
pub mod table;
pub mod units;
pub mod charts;
pub mod chat;
pub mod llm;
pub mod engine;
pub mod dashboard;
