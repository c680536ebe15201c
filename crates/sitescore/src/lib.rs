//! Command-line front end for the sitescore engine
//!
//! Loads datasets and session configuration from disk, drives the engine's
//! mode controllers and renders their reports as text or JSON.

pub mod config;
pub mod data;
pub mod logging;
pub mod report;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, SessionConfig};
pub use data::{LoadError, load_dataset};
pub use logging::init_logging;
