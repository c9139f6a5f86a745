// wokmon entry point.
// Loads configuration, sets up logging and the terminal, and runs the app.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use wokmon::api::MonitorClient;
use wokmon::app::App;
use wokmon::config::{Args, Config};
use wokmon::{Result, logging, paths};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_path = paths::log_path();
    if !logging::init_logging(log_path.as_deref()) {
        eprintln!("Warning: could not open log file, logging disabled");
    }
    info!(
        instance = %config.instance_name,
        server = %config.server_url,
        interval_secs = config.poll_interval.as_secs(),
        "starting"
    );

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "exiting with error");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    let client = MonitorClient::new(&config.server_url)?;
    let mut app = App::new(config, Arc::new(client))?;

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    Ok(result?)
}
