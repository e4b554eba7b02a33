use std::path::PathBuf;

use jiff::tz::TimeZone;
use thiserror::Error;

use crate::services::calendar::WeekStart;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown time zone '{name}': {source}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    /// Zone used to turn instants into calendar days
    pub time_zone: TimeZone,
    pub week_start: WeekStart,
}

impl Config {
    /// Fill unset values with defaults. CLI flags and their environment
    /// fallbacks are already merged by the caller.
    pub fn resolve(
        store_path: Option<PathBuf>,
        time_zone: Option<&str>,
        week_start: Option<WeekStart>,
    ) -> Result<Config, ConfigError> {
        let time_zone = match time_zone {
            Some(name) => TimeZone::get(name).map_err(|e| ConfigError::UnknownTimeZone {
                name: name.to_string(),
                source: e,
            })?,
            None => TimeZone::system(),
        };

        Ok(Config {
            store_path: store_path.unwrap_or_else(default_store_path),
            time_zone,
            week_start: week_start.unwrap_or_default(),
        })
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskpulse")
        .join("snapshot.json")
}
