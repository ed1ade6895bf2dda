//! Configuration infrastructure
//!
//! Every setting has a compiled-in default, so a plain run needs no file and no
//! environment. Layers, lowest to highest precedence:
//! 1. Defaults (`defaults` module)
//! 2. Optional config file (`--config`)
//! 3. Environment variables `CRUISE_SCRAPER__<SECTION>__<KEY>`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CRUISE_SCRAPER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub logging: LoggingConfig,
}

/// Settings of the scrape pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site root; detail hrefs are resolved against it
    pub base_url: String,

    /// Path of the cruise listing page
    pub listing_path: String,

    /// Maximum number of cruises taken from the listing page
    pub cruise_limit: usize,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Per-request timeout for detail pages
    pub detail_timeout_seconds: u64,

    /// Timeout for the listing page; none by default
    pub listing_timeout_seconds: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: lueftner::BASE_URL.to_string(),
            listing_path: lueftner::LISTING_PATH.to_string(),
            cruise_limit: defaults::CRUISE_LIMIT,
            user_agent: defaults::USER_AGENT.to_string(),
            detail_timeout_seconds: defaults::DETAIL_TIMEOUT_SECONDS,
            listing_timeout_seconds: None,
        }
    }
}

impl ScraperConfig {
    /// Absolute URL of the listing page
    pub fn listing_url(&self) -> Result<String, ConfigError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::validation(format!("base_url '{}': {}", self.base_url, e)))?;
        base.join(&self.listing_path)
            .map(String::from)
            .map_err(|e| ConfigError::validation(format!("listing_path '{}': {}", self.listing_path, e)))
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_seconds)
    }

    pub fn listing_timeout(&self) -> Option<Duration> {
        self.listing_timeout_seconds.map(Duration::from_secs)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Log to stderr
    pub console_output: bool,

    /// Also log to `<directory>/<file_name>`
    pub file_output: bool,

    pub file_name: String,

    /// Log file directory; `logs/` next to the executable when unset
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(path, environment())
    }

    fn load_layers(path: Option<&Path>, env: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder.add_source(env).build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        if let Some(path) = path {
            info!("Loaded configuration from: {:?}", path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scraper = &self.scraper;

        if scraper.cruise_limit == 0 {
            return Err(ConfigError::validation("cruise_limit must be greater than 0"));
        }
        if scraper.detail_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "detail_timeout_seconds must be greater than 0",
            ));
        }
        if scraper.listing_timeout_seconds == Some(0) {
            return Err(ConfigError::validation(
                "listing_timeout_seconds must be greater than 0 when set",
            ));
        }
        if scraper.user_agent.trim().is_empty() {
            return Err(ConfigError::validation("user_agent must not be empty"));
        }
        scraper.listing_url()?;

        Ok(())
    }
}

/// `CRUISE_SCRAPER__<SECTION>__<KEY>` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Lueftner Cruises site locations
pub mod lueftner {
    pub const BASE_URL: &str = "https://www.lueftner-cruises.com";

    pub const LISTING_PATH: &str = "/en/river-cruises/cruise.html";
}

/// Default values
pub mod defaults {
    /// Cruise containers taken from the listing page
    pub const CRUISE_LIMIT: usize = 4;

    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.75 Safari/537.36";

    pub const DETAIL_TIMEOUT_SECONDS: u64 = 30;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "cruise-scraper.log";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_site() {
        let config = AppConfig::default();
        assert_eq!(config.scraper.cruise_limit, 4);
        assert_eq!(config.scraper.detail_timeout(), Duration::from_secs(30));
        assert_eq!(config.scraper.listing_timeout(), None);
        assert_eq!(
            config.scraper.listing_url().unwrap(),
            "https://www.lueftner-cruises.com/en/river-cruises/cruise.html"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_only_given_keys() {
        let file = write_config(
            ".toml",
            r#"
            [scraper]
            cruise_limit = 2
            detail_timeout_seconds = 5

            [logging]
            level = "debug"
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scraper.cruise_limit, 2);
        assert_eq!(config.scraper.detail_timeout_seconds, 5);
        assert_eq!(config.scraper.user_agent, defaults::USER_AGENT);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.console_output);
    }

    #[test]
    fn zero_cruise_limit_is_rejected() {
        let file = write_config(".toml", "[scraper]\ncruise_limit = 0\n");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.scraper.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            ".toml",
            "[scraper]\ncruise_limit = 3\ndetail_timeout_seconds = 5\n",
        );
        let env = env_with(&[
            ("CRUISE_SCRAPER__SCRAPER__CRUISE_LIMIT", "2"),
            ("CRUISE_SCRAPER__LOGGING__JSON_FORMAT", "true"),
            ("UNRELATED__SCRAPER__CRUISE_LIMIT", "9"),
        ]);

        let config = AppConfig::load_layers(Some(file.path()), env).unwrap();
        assert_eq!(config.scraper.cruise_limit, 2);
        assert_eq!(config.scraper.detail_timeout_seconds, 5);
        assert!(config.logging.json_format);
    }

    #[test]
    fn environment_values_are_validated() {
        let env = env_with(&[("CRUISE_SCRAPER__SCRAPER__DETAIL_TIMEOUT_SECONDS", "0")]);
        let err = AppConfig::load_layers(None, env).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/cruise-scraper.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
