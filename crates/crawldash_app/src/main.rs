mod app;
mod command;
mod config;
mod effects;
mod logging;
mod render;

use std::env;
use std::path::PathBuf;

use crawldash_logging::{dash_info, dash_warn};

use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};

fn main() -> anyhow::Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let (config, config_error) = match AppConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(
        config.log_destination,
        crawldash_logging::parse_level(&config.log_level),
    );
    if let Some(err) = config_error {
        dash_warn!("{}; using defaults", err);
    }
    dash_info!("Starting crawldash against {}", config.base_url);

    app::run(&config)
}
