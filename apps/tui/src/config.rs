use dotenv::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use theft_dashboard_core::{NumberFormat, DEFAULT_RESOURCE};
use thiserror::Error;

/// Where the dashboard document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// URLs with an `http`/`https` scheme are fetched, anything else is a
    /// path on disk.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_RESOURCE))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported locale {0:?} (expected en, de, fr or ch)")]
    UnknownLocale(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: DataSource,
    pub numbers: NumberFormat,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            numbers: NumberFormat::default(),
            log_file: None,
            debug: false,
        }
    }
}

/// Loads `.env` and builds the configuration from the process environment.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();
    config_from_lookup(|key| env::var(key).ok())
}

/// Builds the configuration from any key lookup. Empty values count as
/// unset.
pub fn config_from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let source = get("DASHBOARD_SOURCE").map_or_else(DataSource::default, |value| {
        DataSource::parse(&value)
    });

    let numbers = match get("DASHBOARD_LOCALE") {
        Some(tag) => NumberFormat::for_locale(&tag).ok_or(ConfigError::UnknownLocale(tag))?,
        None => NumberFormat::default(),
    };

    let log_file = get("DASHBOARD_LOG_FILE").map(PathBuf::from);
    let debug = get("DEBUG").is_some_and(|value| !matches!(value.trim(), "0" | "false"));

    Ok(AppConfig {
        source,
        numbers,
        log_file,
        debug,
    })
}
