//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

use crate::constants::TICKS_PER_SECOND;
use crate::error::ConfigError;

pub const SEED_VAR: &str = "STAR_STRIKER_SEED";
pub const FPS_VAR: &str = "STAR_STRIKER_FPS";
pub const LOG_VAR: &str = "STAR_STRIKER_LOG";

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Fixed RNG seed for a reproducible run; random when unset.
    pub seed: Option<u64>,
    pub frame_rate: u32,
    /// Trace log destination. No subscriber is installed without one.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: TICKS_PER_SECOND,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let seed = read(SEED_VAR)
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue { var: SEED_VAR, value })
            })
            .transpose()?;

        let frame_rate = match read(FPS_VAR) {
            None => TICKS_PER_SECOND,
            Some(value) => {
                let fps = value
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidValue { var: FPS_VAR, value })?;
                if !(MIN_FPS..=MAX_FPS).contains(&fps) {
                    return Err(ConfigError::OutOfRange {
                        var: FPS_VAR,
                        value: fps,
                        min: MIN_FPS,
                        max: MAX_FPS,
                    });
                }
                fps
            }
        };

        Ok(Self {
            seed,
            frame_rate,
            log_file: read(LOG_VAR).map(PathBuf::from),
        })
    }
}
