//! Account registration, login navigation and a persisted user directory
//! for a single-session administration front end.
//!
//! [`App`] is the entry point: build one from an [`AppConfig`] through a
//! [`Container`] and drive it from the presentation layer.

pub mod app;
pub mod config;
pub mod container;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod services;
pub mod telemetry;

pub use app::App;
pub use config::AppConfig;
pub use container::Container;

use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Configuration(#[from] figment::Error),
    #[error(transparent)]
    Telemetry(#[from] telemetry::TelemetryError),
}

/// Loads configuration, installs logging and wires a ready [`App`].
pub fn start() -> Result<App, StartupError> {
    let config = AppConfig::load()?;

    telemetry::configure(&config.service, &config.logging)?;

    Ok(Container::new(&config).app())
}
