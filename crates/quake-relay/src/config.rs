//! Relay configuration from the environment.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use quake_core::{ConfigError, GeoPoint, TargetConfig, Tz, DEFAULT_TIMEZONE};
use telegram_bot::{BotConfig, DEFAULT_API_URL};
use tracing::debug;
use usgs_client::{UsgsConfig, DEFAULT_BASE_URL};

use crate::scheduler::SchedulerConfig;

/// Env file read at startup, in addition to `.env`.
pub const CONFIG_FILE: &str = "config.env";

/// Default per-request HTTP timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Everything the relay needs to start.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub target: TargetConfig,
    pub bot: BotConfig,
    pub usgs: UsgsConfig,
    pub scheduler: SchedulerConfig,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `TG_TOKEN` - bot token
    /// - `CHAT_ID` - chat or channel to post to
    /// - `TARGET_PLACE_LATITUDE`, `TARGET_PLACE_LONGITUDE` - decimal degrees
    /// - `TARGET_PLACE_NAME` - display name used in alerts
    /// - `MAX_RADIUS` - kilometers
    /// - `MIN_MAGNITUDE` - integer magnitude threshold
    /// - `MINUTES_COUNT` - lookback window in minutes
    ///
    /// Optional env vars:
    /// - `POLL_INTERVAL_MINUTES` (default: `MINUTES_COUNT`)
    /// - `ALERT_TIMEZONE` (default: Asia/Almaty)
    /// - `USGS_API_URL` (default: USGS FDSN event query endpoint)
    /// - `TELEGRAM_API_URL` (default: https://api.telegram.org)
    /// - `HTTP_TIMEOUT_SECS` (default: 30)
    /// - `CYCLE_TIMEOUT_SECS` (default: no deadline)
    /// - `RUN_ON_START` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, "TG_TOKEN")?;
        let chat_id = required(&lookup, "CHAT_ID")?;

        let lat: f64 = parse_required(&lookup, "TARGET_PLACE_LATITUDE")?;
        let lon: f64 = parse_required(&lookup, "TARGET_PLACE_LONGITUDE")?;
        let name = required(&lookup, "TARGET_PLACE_NAME")?;
        let max_radius_km: f64 = parse_required(&lookup, "MAX_RADIUS")?;
        let min_magnitude: i32 = parse_required(&lookup, "MIN_MAGNITUDE")?;
        let lookback_minutes: u32 = parse_required(&lookup, "MINUTES_COUNT")?;

        let poll_minutes: u32 =
            parse_optional(&lookup, "POLL_INTERVAL_MINUTES")?.unwrap_or(lookback_minutes);
        if poll_minutes == 0 {
            return Err(ConfigError::invalid(
                "POLL_INTERVAL_MINUTES",
                "must be greater than zero",
            ));
        }

        let timezone = match optional(&lookup, "ALERT_TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| ConfigError::invalid("ALERT_TIMEZONE", e.to_string()))?,
            None => DEFAULT_TIMEZONE,
        };

        let target = TargetConfig::new(
            GeoPoint::new(lat, lon)?,
            name,
            max_radius_km,
            min_magnitude,
            lookback_minutes,
        )?
        .with_timezone(timezone);

        let http_timeout = Duration::from_secs(
            parse_optional(&lookup, "HTTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        );

        let bot = BotConfig::new(token, chat_id)
            .with_api_url(optional(&lookup, "TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()))
            .with_timeout(http_timeout);

        let usgs = UsgsConfig::new(
            optional(&lookup, "USGS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )
        .with_timeout(http_timeout);

        let mut scheduler = SchedulerConfig::new(Duration::from_secs(u64::from(poll_minutes) * 60))
            .with_run_on_start(parse_flag(&lookup, "RUN_ON_START")?);
        if let Some(secs) = parse_optional::<u64, _>(&lookup, "CYCLE_TIMEOUT_SECS")? {
            scheduler = scheduler.with_cycle_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            target,
            bot,
            usgs,
            scheduler,
        })
    }
}

/// Load `config.env` and `.env` into the process environment.
///
/// Variables already set in the environment take precedence. Missing files
/// are not an error.
pub fn load_env_files() {
    if let Err(e) = dotenvy::from_filename(CONFIG_FILE) {
        debug!("No {} loaded: {}", CONFIG_FILE, e);
    }
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env loaded: {}", e);
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_required<T, F>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, key)?;
    raw.parse::<T>()
        .map_err(|e| ConfigError::invalid(key, format!("{:?}: {}", raw, e)))
}

fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::invalid(key, format!("{:?}: {}", raw, e)))
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key).map(|v| v.to_lowercase()).as_deref() {
        None | Some("false" | "0" | "no") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some(other) => Err(ConfigError::invalid(key, format!("{:?} is not a boolean", other))),
    }
}
