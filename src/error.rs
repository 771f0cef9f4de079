//! Error kinds for the simulation core

use std::fmt;

/// Errors produced by geometry helpers, level loading and settings
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Attempted to normalize a vector of length zero
    ZeroVector,
    /// Brick grid with a zero dimension
    InvalidLevel { width: u32, height: u32 },
    /// Settings parsed but failed validation, or could not be parsed
    InvalidSettings(String),
    /// Settings file could not be read
    SettingsIo(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ZeroVector => write!(f, "cannot normalize a zero-length vector"),
            SimError::InvalidLevel { width, height } => {
                write!(f, "invalid brick grid {width}x{height}: both dimensions must be positive")
            }
            SimError::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            SimError::SettingsIo(msg) => write!(f, "could not read settings: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::InvalidSettings(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::SettingsIo(err.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_level() {
        let err = SimError::InvalidLevel {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid brick grid 0x5: both dimensions must be positive"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: SimError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, SimError::InvalidSettings(_)));
    }
}
