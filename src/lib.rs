//! Weather Form - look up current weather for a city from an HTML form
//!
//! A single `/` route shows a form on GET and, on POST, asks the weather
//! provider about the submitted city and renders the report or a
//! "City not found" message.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use models::{CityForm, ProviderFailure, WeatherReport, WeatherResult};
pub use routes::{configure_routes, form_config, AppState, LookupError};
pub use services::{ProviderError, WeatherClient};
