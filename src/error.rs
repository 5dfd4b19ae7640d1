//! Errors surfaced by the front end. The simulation itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("{var} must be between {min} and {max}, got {value}")]
    OutOfRange {
        var: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O error")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
