// Service exports
pub mod openweather;

pub use openweather::{ProviderError, WeatherClient};
