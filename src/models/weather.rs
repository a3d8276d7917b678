use serde::Deserialize;
use serde_json::Number;

/// Message shown for every lookup the provider does not answer with an OK status
pub const CITY_NOT_FOUND: &str = "City not found";

/// Current conditions as reported by the provider
///
/// Numbers are kept as [`Number`] so they render exactly as the provider sent
/// them (`72.0` stays `72.0`, `72` stays `72`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

impl WeatherReport {
    /// Description of the first reported condition
    pub fn condition(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: Number,
}

/// Fixed substitute for a rejected lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub error: String,
}

impl ProviderFailure {
    pub fn city_not_found() -> Self {
        Self {
            error: CITY_NOT_FOUND.to_string(),
        }
    }
}

/// Outcome of one provider lookup
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherResult {
    Report(WeatherReport),
    Failure(ProviderFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{"name":"London","main":{"temp":72.0},"weather":[{"description":"light rain"}],"wind":{"speed":5.5}}"#;

    #[test]
    fn test_report_keeps_number_text() {
        let report: WeatherReport = serde_json::from_str(LONDON).unwrap();

        assert_eq!(report.name, "London");
        assert_eq!(report.main.temp.to_string(), "72.0");
        assert_eq!(report.wind.speed.to_string(), "5.5");
        assert_eq!(report.condition(), "light rain");
    }

    #[test]
    fn test_report_ignores_extra_provider_fields() {
        let json = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "name": "London",
            "main": {"temp": 72, "humidity": 81},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "wind": {"speed": 5.5, "deg": 240},
            "cod": 200
        }"#;

        let report: WeatherReport = serde_json::from_str(json).unwrap();

        assert_eq!(report.main.temp.to_string(), "72");
        assert_eq!(report.condition(), "light rain");
    }

    #[test]
    fn test_report_missing_section_fails() {
        let json = r#"{"name":"London","main":{"temp":72.0},"wind":{"speed":5.5}}"#;
        assert!(serde_json::from_str::<WeatherReport>(json).is_err());
    }

    #[test]
    fn test_condition_of_empty_weather_list() {
        let report = WeatherReport {
            name: "Nowhere".to_string(),
            main: MainReadings { temp: Number::from(0) },
            weather: vec![],
            wind: Wind { speed: Number::from(0) },
        };

        assert_eq!(report.condition(), "");
    }

    #[test]
    fn test_city_not_found_failure() {
        assert_eq!(ProviderFailure::city_not_found().error, "City not found");
    }
}
