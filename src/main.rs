#![allow(warnings)]
//! Treeboard Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod error;
mod id;
mod kanban;
mod models;
mod store;
mod tree;

use app::App;
use config::AppConfig;
use console_logger::LoggerConfig;
use error::AppError;
use leptos::prelude::*;
use tracing::{info, warn};

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_document() {
        None => (AppConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (AppConfig::default(), Some(err)),
    };

    let logger = LoggerConfig {
        level: config.log_level.clone(),
        history: config.log_history,
    };
    let history = match console_logger::init(&logger).map_err(AppError::from) {
        Ok(history) => Some(history),
        Err(err) => {
            leptos::logging::warn!("logging disabled: {err}");
            None
        }
    };
    if let Some(err) = config_error {
        warn!(%err, "ignoring embedded config, using defaults");
    }
    info!(level = %config.log_level, seeded = config.rng_seed.is_some(), "starting treeboard");

    mount_to_body(move || view! { <App config=config.clone() history=history.clone() /> });
}
