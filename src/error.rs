use druid::PlatformError;
use thiserror::Error;

/// Rejected command line values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be between {min} and {max} pixels, got {value}")]
    Dimension {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to launch window: {0}")]
    Launch(#[from] PlatformError),
}
