use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the weather provider credential
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Environment variable naming a settings file to use instead of `config/`
pub const CONFIG_PATH_VAR: &str = "WEATHER_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Weather provider settings
///
/// `api_key` is not validated. An empty key is sent as-is and the provider's
/// rejection is rendered like any other failed lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_units")]
    pub units: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            units: default_units(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}
fn default_units() -> String { "imperial".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load from the file named by WEATHER_CONFIG, or from `config/` when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load_from(path),
            Err(_) => Self::load(),
        }
    }

    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with WEATHER__)
    /// 4. The provider credential from WEATHER_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // e.g., WEATHER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("WEATHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_api_key(settings, std::env::var(API_KEY_VAR).ok())?.try_deserialize()
    }

    /// Load configuration from a custom path
    ///
    /// The file replaces `config/default` and `config/local`; WEATHER__* and
    /// WEATHER_API_KEY still override it.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("WEATHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_api_key(settings, std::env::var(API_KEY_VAR).ok())?.try_deserialize()
    }
}

/// Override `provider.api_key` with the credential from the environment, if any
fn apply_api_key(settings: Config, api_key: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = api_key {
        builder = builder.set_override("provider.api_key", key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_when_no_sources() {
        let settings: Settings = from_toml("").try_deserialize().unwrap();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.workers, None);
        assert_eq!(
            settings.provider.base_url,
            "https://api.openweathermap.org/data/2.5/weather"
        );
        assert_eq!(settings.provider.api_key, "");
        assert_eq!(settings.provider.units, "imperial");
        assert_eq!(settings.provider.timeout_secs, None);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let settings: Settings = from_toml(
            r#"
            [server]
            port = 9000
            workers = 2

            [provider]
            base_url = "http://localhost:1234/weather"
            timeout_secs = 5
            "#,
        )
        .try_deserialize()
        .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.workers, Some(2));
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.provider.base_url, "http://localhost:1234/weather");
        assert_eq!(settings.provider.timeout_secs, Some(5));
        assert_eq!(settings.provider.units, "imperial");
    }

    #[test]
    fn test_api_key_override_wins_over_file() {
        let base = from_toml("[provider]\napi_key = \"from-file\"\n");
        let settings: Settings = apply_api_key(base, Some("from-env".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.provider.api_key, "from-env");
    }

    #[test]
    fn test_missing_api_key_stays_empty() {
        let settings: Settings = apply_api_key(from_toml(""), None)
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.provider.api_key, "");
    }
}
