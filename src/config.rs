// Configuration for wokmon.
// Merges command-line arguments over an optional TOML config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::{MonitorError, Result};
use crate::paths;
use crate::views::{LOGS_TAB, TAB_KEYS};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_BANNER_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_TAB: &str = LOGS_TAB;

/// Monitor the modules and logs of a running workflow instance.
#[derive(Debug, Default, Parser)]
#[command(name = "wokmon", version, about)]
pub struct Args {
    /// Name of the instance to monitor.
    #[arg(value_name = "INSTANCE")]
    pub instance: String,

    /// Base URL of the workflow server.
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Seconds between status polls (default: 10).
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Tab shown at startup: modules or logs (default: logs).
    #[arg(short, long, value_name = "TAB")]
    pub tab: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub initial_tab: Option<String>,
    pub banner_ttl_secs: Option<u64>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub instance_name: String,
    pub server_url: String,
    pub poll_interval: Duration,
    pub initial_tab: String,
    pub banner_ttl: Duration,
}

impl Config {
    /// Load the config file (explicit path or default location) and apply arguments.
    pub fn load(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => match paths::config_path() {
                Some(path) if path.exists() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(args, file)
    }

    /// Arguments take precedence over the file; defaults fill the rest.
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let instance_name = args.instance.trim().to_string();
        if instance_name.is_empty() {
            return Err(MonitorError::Config("instance name is empty".to_string()));
        }

        let server_url = args
            .server
            .clone()
            .or(file.server_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let poll_interval = match args.interval.or(file.poll_interval_secs) {
            Some(0) => {
                return Err(MonitorError::Config(
                    "poll interval must be at least 1 second".to_string(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_POLL_INTERVAL,
        };

        let initial_tab = args
            .tab
            .clone()
            .or(file.initial_tab)
            .unwrap_or_else(|| DEFAULT_TAB.to_string());
        if !TAB_KEYS.contains(&initial_tab.as_str()) {
            return Err(MonitorError::Config(format!(
                "unknown tab '{}' (expected one of: {})",
                initial_tab,
                TAB_KEYS.join(", ")
            )));
        }

        let banner_ttl = file
            .banner_ttl_secs
            .map_or(DEFAULT_BANNER_TTL, Duration::from_secs);

        Ok(Self {
            instance_name,
            server_url,
            poll_interval,
            initial_tab,
            banner_ttl,
        })
    }
}
