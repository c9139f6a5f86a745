// wokmon: terminal dashboard for a running workflow instance.
// Polls the instance's status endpoint and feeds the visible tab.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod paths;
pub mod state;
pub mod ui;
pub mod views;

pub use error::{MonitorError, Result};
