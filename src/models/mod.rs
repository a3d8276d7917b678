// Model exports
pub mod requests;
pub mod weather;

pub use requests::CityForm;
pub use weather::{Condition, MainReadings, ProviderFailure, WeatherReport, WeatherResult, Wind, CITY_NOT_FOUND};
