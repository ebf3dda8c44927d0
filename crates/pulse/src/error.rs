//! Error types for pulse.

use thiserror::Error;

/// Main error type for pulse operations.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown region: {0}. Run `pulse regions` to list configured regions.")]
    UnknownRegion(String),

    #[error(transparent)]
    Core(pulse_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<pulse_core::Error> for PulseError {
    fn from(e: pulse_core::Error) -> Self {
        match e {
            pulse_core::Error::UnknownRegion(code) => PulseError::UnknownRegion(code),
            pulse_core::Error::EmptyCatalog => {
                PulseError::Config("refresh.regions must list at least one region".to_string())
            }
            other => PulseError::Core(other),
        }
    }
}

impl From<toml::de::Error> for PulseError {
    fn from(e: toml::de::Error) -> Self {
        PulseError::Config(e.to_string())
    }
}

/// Result type alias for pulse operations.
pub type PulseResult<T> = Result<T, PulseError>;
