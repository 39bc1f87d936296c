//! Error types for Sandglass.
//!
//! The geometry engine itself never fails: inputs are clamped and degenerate
//! bounds short-circuit. Errors only come from loading and saving settings.

use std::fmt;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Debug)]
pub enum SandglassError {
    /// Failed to read or write a settings file.
    Io(std::io::Error),
    /// Settings document is not valid JSON or has the wrong shape.
    Json(serde_json::Error),
    /// A setting parsed but holds an unusable value.
    InvalidSetting(String),
}

impl fmt::Display for SandglassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandglassError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SandglassError::Json(e) => write!(f, "Failed to parse settings: {}", e),
            SandglassError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for SandglassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SandglassError::Io(e) => Some(e),
            SandglassError::Json(e) => Some(e),
            SandglassError::InvalidSetting(_) => None,
        }
    }
}

impl From<std::io::Error> for SandglassError {
    fn from(e: std::io::Error) -> Self {
        SandglassError::Io(e)
    }
}

impl From<serde_json::Error> for SandglassError {
    fn from(e: serde_json::Error) -> Self {
        SandglassError::Json(e)
    }
}

/// Result alias used by the settings layer.
pub type Result<T> = std::result::Result<T, SandglassError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_and_source() {
        let err = SandglassError::InvalidSetting("line_width must be >= 0".into());
        assert_eq!(err.to_string(), "Invalid setting: line_width must be >= 0");
        assert!(err.source().is_none());

        let io = SandglassError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
        assert!(io.to_string().contains("gone"));
    }
}
