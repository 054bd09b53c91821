use crate::errors::ConfigError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INSTRUMENT: &str = "BTC-PERPETUAL";
pub const DEFAULT_DATA_TYPE: &str = "funding_rate_history";
pub const DEFAULT_START_DATE: &str = "2025-07-10";
pub const DEFAULT_END_DATE: &str = "2025-07-17";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./data/raw";
pub const DEFAULT_CHUNK_SIZE_DAYS: u32 = 1;
pub const DEFAULT_SLEEP_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_API_URL: &str = "https://www.deribit.com";

/// Deribit refuses funding-rate queries spanning more than this.
pub const MAX_CHUNK_SIZE_DAYS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub instrument: String,
    pub data_type: String,
    /// Inclusive, `YYYY-MM-DD`.
    pub start_date: String,
    /// Exclusive, `YYYY-MM-DD`.
    pub end_date: String,
    pub chunk_size_days: u32,
    pub sleep_interval: Duration,
    pub output_dir: PathBuf,
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instrument: DEFAULT_INSTRUMENT.to_string(),
            data_type: DEFAULT_DATA_TYPE.to_string(),
            start_date: DEFAULT_START_DATE.to_string(),
            end_date: DEFAULT_END_DATE.to_string(),
            chunk_size_days: DEFAULT_CHUNK_SIZE_DAYS,
            sleep_interval: DEFAULT_SLEEP_INTERVAL,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from the built-in defaults, overriding any key that
    /// `lookup` resolves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(instrument) = lookup("INSTRUMENT_NAME") {
            config.instrument = instrument.trim().to_uppercase();
        }
        if let Some(data_type) = lookup("DATA_TYPE") {
            config.data_type = data_type.trim().to_string();
        }
        if let Some(start) = lookup("START_DATE") {
            config.start_date = start.trim().to_string();
        }
        if let Some(end) = lookup("END_DATE") {
            config.end_date = end.trim().to_string();
        }
        if let Some(dir) = lookup("OUTPUT_DIRECTORY") {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(url) = lookup("DERIBIT_API_URL") {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("CHUNK_SIZE_DAYS") {
            config.chunk_size_days = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "CHUNK_SIZE_DAYS",
                    value: raw.clone(),
                    expected: "a positive whole number of days",
                })?;
        }

        if let Some(raw) = lookup("SLEEP_INTERVAL_SECONDS") {
            config.sleep_interval = raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| ConfigError::Invalid {
                    key: "SLEEP_INTERVAL_SECONDS",
                    value: raw.clone(),
                    expected: "a non-negative number of seconds",
                })?;
        }

        if config.chunk_size_days > MAX_CHUNK_SIZE_DAYS {
            tracing::warn!(
                "chunk size of {} days exceeds Deribit's {}-day query limit",
                config.chunk_size_days,
                MAX_CHUNK_SIZE_DAYS
            );
        }

        Ok(config)
    }

    pub fn chunk_size_ms(&self) -> i64 {
        i64::from(self.chunk_size_days) * 24 * 60 * 60 * 1000
    }
}
