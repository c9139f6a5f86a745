// Monitoring API module.
// Provides the client and snapshot types for the workflow server's monitoring endpoints.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{MonitorClient, SnapshotSource};
pub use types::*;
