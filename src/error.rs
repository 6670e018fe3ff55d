//! Error type shared by the fallible edges of the crate.
//!
//! The engine itself never fails; errors only come from parsing move notation,
//! loading configuration and constructing a cube with an unusable size.

/// Errors produced by notation parsing, configuration and cube construction.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid move {0:?}, expected one of F B U D R L with optional '")]
    InvalidMove(String),
    #[error("invalid cube size {0}, must be between 1 and {max}", max = crate::config::MAX_SIZE)]
    InvalidSize(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
