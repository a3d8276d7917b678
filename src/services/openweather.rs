use crate::config::ProviderSettings;
use crate::models::{ProviderFailure, WeatherReport, WeatherResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the weather provider
///
/// A rejected lookup is not an error: it becomes [`WeatherResult::Failure`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Carries no URL: the request URL holds the credential
    #[error("HTTP request failed: {0}")]
    RequestError(reqwest::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// OpenWeatherMap "current weather" client
///
/// Issues exactly one GET per lookup:
/// `<base_url>?q=<city>&units=<units>&appid=<api_key>`
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    units: String,
    client: Client,
}

impl WeatherClient {
    /// Create a new provider client
    ///
    /// Without a timeout the request waits for the provider as long as the
    /// connection stays open.
    pub fn new(
        base_url: String,
        api_key: String,
        units: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            api_key,
            units,
            client: builder.build().map_err(request_error)?,
        })
    }

    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            settings.units.clone(),
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up current weather for `city`
    ///
    /// The city is passed through untouched apart from query-string encoding.
    /// Every non-OK status collapses to [`ProviderFailure::city_not_found`],
    /// whatever the provider said in its body.
    pub async fn current_weather(&self, city: &str) -> Result<WeatherResult, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("units", self.units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !is_ok(status) {
            tracing::info!("Provider rejected lookup: {}", status);
            return Ok(WeatherResult::Failure(ProviderFailure::city_not_found()));
        }

        let body = response.bytes().await.map_err(request_error)?;

        let report: WeatherReport = serde_json::from_slice(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse weather report: {}", e))
        })?;

        if report.weather.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Missing weather conditions".into(),
            ));
        }

        tracing::debug!("Provider returned weather for {}", report.name);

        Ok(WeatherResult::Report(report))
    }
}

fn request_error(err: reqwest::Error) -> ProviderError {
    ProviderError::RequestError(err.without_url())
}

/// Any status below 400 counts as OK
fn is_ok(status: StatusCode) -> bool {
    !(status.is_client_error() || status.is_server_error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_client_creation() {
        let client = WeatherClient::new(
            "https://weather.test/data/2.5/weather".to_string(),
            "test_key".to_string(),
            "imperial".to_string(),
            None,
        )
        .unwrap();

        assert_eq!(client.base_url(), "https://weather.test/data/2.5/weather");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.units, "imperial");
    }

    #[test]
    fn test_client_from_default_settings() {
        let client = WeatherClient::from_settings(&ProviderSettings::default()).unwrap();

        assert_eq!(
            client.base_url(),
            "https://api.openweathermap.org/data/2.5/weather"
        );
        assert_eq!(client.api_key, "");
    }

    #[test]
    fn test_status_classes() {
        assert!(is_ok(StatusCode::OK));
        assert!(is_ok(StatusCode::NOT_MODIFIED));
        assert!(!is_ok(StatusCode::UNAUTHORIZED));
        assert!(!is_ok(StatusCode::NOT_FOUND));
        assert!(!is_ok(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_ok(StatusCode::BAD_GATEWAY));
    }
}
