//! wendash - terminal dashboard for the WENBNB bot backend.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod sse;
pub mod terminal;
pub mod traits;
pub mod ui;
