//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - The weather code registry (icon and description per WMO code)
//! - The resolved display model
//! - User preferences handling
//!
//! It is used by `meteo-cli`, but can also be embedded in any UI that
//! already holds a numeric weather code from a forecast source.

pub mod codes;
pub mod config;
pub mod model;

pub use codes::{
    FALLBACK_DESCRIPTION, FALLBACK_ICON, ParseCodeError, WeatherCode, WeatherCodeEntry,
    description, icon, lookup,
};
pub use config::{Config, OutputFormat};
pub use model::WeatherCondition;
