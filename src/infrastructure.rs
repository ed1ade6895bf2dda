//! Infrastructure layer: HTTP, HTML parsing, configuration and logging

pub mod config;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod simple_http_client;

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, LoggingConfig, ScraperConfig};
pub use logging::{flush_logging, init_logging_with_config};
pub use parsing::{CruiseListParser, ItineraryDetailParser, ParsingResult, StructuralParseError};
pub use simple_http_client::{HttpClient, HttpClientConfig};
