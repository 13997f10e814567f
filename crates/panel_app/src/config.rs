use std::time::Duration;

use log::LevelFilter;
use panel_engine::ClientSettings;
use thiserror::Error;
use url::Url;

use crate::cli::GlobalArgs;
use crate::platform::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend url {0:?} must use http or https")]
    UnsupportedScheme(String),
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Resolved front-end configuration (CLI flags over environment over defaults).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub(crate) fn from_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(args.base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
                value: args.base_url.clone(),
                source,
            })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(args.base_url.clone()));
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(args.timeout_secs),
            log_destination: args.log,
            log_level: args.log_level,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: self.request_timeout,
            ..ClientSettings::with_base_url(self.base_url.clone())
        }
    }
}
