use std::env;
use std::str::FromStr;
use std::time::Duration;

use formats::config::ConfigError;
use serde::Deserialize;

pub const ENV_FLY_DURATION_S: &str = "TRAVELMAP_FLY_DURATION_S";
pub const ENV_CAMERA_CHANGE_THRESHOLD: &str = "TRAVELMAP_CAMERA_CHANGE_THRESHOLD";
pub const ENV_THROTTLE_MS: &str = "TRAVELMAP_THROTTLE_MS";

/// Tuning for the synchronization controller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Duration of entity fly-to transitions (seconds).
    pub fly_duration_s: f64,
    /// Fraction of the viewport a manual camera move must exceed before the
    /// next selection is framed from scratch.
    pub camera_change_threshold: f64,
    /// Minimum spacing between filmstrip scans for scrub and for tick (ms).
    pub throttle_window_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fly_duration_s: 1.5,
            camera_change_threshold: 0.2,
            throttle_window_ms: 200,
        }
    }
}

impl SyncConfig {
    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_window_ms)
    }

    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: SyncConfig = serde_json::from_str(payload)?;
        config.validated()
    }

    /// Defaults overridden by `TRAVELMAP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SyncConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            fly_duration_s: lookup_parse(&lookup, ENV_FLY_DURATION_S, d.fly_duration_s)?,
            camera_change_threshold: lookup_parse(
                &lookup,
                ENV_CAMERA_CHANGE_THRESHOLD,
                d.camera_change_threshold,
            )?,
            throttle_window_ms: lookup_parse(&lookup, ENV_THROTTLE_MS, d.throttle_window_ms)?,
        }
        .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.fly_duration_s.is_nan() || self.fly_duration_s < 0.0 {
            return Err(invalid("fly_duration_s", self.fly_duration_s));
        }
        if !(0.0..=1.0).contains(&self.camera_change_threshold) {
            return Err(invalid(
                "camera_change_threshold",
                self.camera_change_threshold,
            ));
        }
        Ok(self)
    }
}

fn lookup_parse<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: key.to_string(),
            value: raw,
        }),
    }
}

fn invalid(name: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}
