use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::{CollectorError, Result};
use crate::search::SearchSettings;

/// Collector configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub yelp_api_key: String,
    pub yelp_api_base: String,

    /// Root data directory; artifacts land in `{data_dir}/pois/raw`.
    pub data_dir: PathBuf,

    pub search_radius_m: u32,
    pub result_limit: u32,
    pub pacing_interval: Duration,
    pub request_timeout: Duration,

    /// How many anchors the end-of-run summary ranks.
    pub top_anchors: usize,
}

impl Config {
    /// Load from the process environment. A missing `YELP_API_KEY` or a
    /// malformed numeric override is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let yelp_api_key = lookup("YELP_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CollectorError::Config(
                    "YELP_API_KEY environment variable is required (set it in .env)".to_string(),
                )
            })?;

        Ok(Self {
            yelp_api_key,
            yelp_api_base: lookup("YELP_API_BASE")
                .unwrap_or_else(|| yelp_client::DEFAULT_BASE_URL.to_string()),
            data_dir: PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "data".to_string())),
            search_radius_m: positive(&lookup, "POI_SEARCH_RADIUS_M", 500)?,
            result_limit: positive(&lookup, "POI_RESULT_LIMIT", 50)?,
            pacing_interval: Duration::from_millis(parsed(&lookup, "POI_PACING_MS", 200)?),
            request_timeout: Duration::from_secs(positive(
                &lookup,
                "POI_REQUEST_TIMEOUT_SECS",
                30,
            )?),
            top_anchors: parsed(&lookup, "POI_TOP_ANCHORS", 10)?,
        })
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            radius_m: self.search_radius_m,
            result_limit: self.result_limit,
            timeout: self.request_timeout,
        }
    }

    /// Log the effective configuration without the API key.
    pub fn log_redacted(&self) {
        info!(
            yelp_api_key = "[hidden]",
            yelp_api_base = %self.yelp_api_base,
            data_dir = %self.data_dir.display(),
            radius_m = self.search_radius_m,
            limit = self.result_limit,
            pacing_ms = self.pacing_interval.as_millis() as u64,
            timeout_secs = self.request_timeout.as_secs(),
            "Loaded collector config"
        );
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CollectorError::Config(format!("{key} must be a number, got {raw:?}"))),
    }
}

/// Like [`parsed`], but zero is rejected.
fn positive<T: FromStr + PartialOrd + Default>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    let value = parsed(lookup, key, default)?;
    if value <= T::default() {
        return Err(CollectorError::Config(format!("{key} must be greater than zero")));
    }
    Ok(value)
}
