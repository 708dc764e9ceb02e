//! Error types for the card number field
//!
//! Normal keyboard input never fails. These errors cover misuse at the API
//! boundary (segment handles that do not exist) and configuration problems.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::classifier::Layout;

/// Top-level error type for card number field operations
#[derive(Debug)]
pub enum CardFieldError {
    /// Segment addressing errors
    Segment(SegmentError),
    /// Configuration errors
    Config(ConfigError),
}

/// Segment addressing errors
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// Tag is out of range for the layout's segment group
    UnknownSegment { layout: Layout, tag: usize },
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file error
    FileError { path: String, error: String },
    /// Configuration could not be parsed
    ParseError { path: String, error: String },
}

impl fmt::Display for CardFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFieldError::Segment(err) => write!(f, "Segment error: {err}"),
            CardFieldError::Config(err) => write!(f, "Configuration error: {err}"),
        }
    }
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::UnknownSegment { layout, tag } => write!(
                f,
                "No segment {tag} in the {layout:?} layout ({} segments)",
                layout.field_count()
            ),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } =>
                write!(f, "Invalid configuration parameter '{parameter}' = '{value}': {reason}"),
            ConfigError::FileError { path, error } =>
                write!(f, "Configuration file error '{path}': {error}"),
            ConfigError::ParseError { path, error } =>
                write!(f, "Configuration file '{path}' could not be parsed: {error}"),
        }
    }
}

impl StdError for CardFieldError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CardFieldError::Segment(err) => Some(err),
            CardFieldError::Config(err) => Some(err),
        }
    }
}

impl StdError for SegmentError {}
impl StdError for ConfigError {}

impl From<SegmentError> for CardFieldError {
    fn from(err: SegmentError) -> Self {
        CardFieldError::Segment(err)
    }
}

impl From<ConfigError> for CardFieldError {
    fn from(err: ConfigError) -> Self {
        CardFieldError::Config(err)
    }
}

impl ConfigError {
    /// Wrap an IO failure on `path`
    pub fn io(path: &std::path::Path, err: io::Error) -> Self {
        ConfigError::FileError {
            path: path.display().to_string(),
            error: err.to_string(),
        }
    }
}

/// Result type alias for card number field operations
pub type CardFieldResult<T> = Result<T, CardFieldError>;

/// Result type for configuration loading and validation
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_segment_message() {
        let err = CardFieldError::from(SegmentError::UnknownSegment { layout: Layout::Three, tag: 5 });
        assert_eq!(err.to_string(), "Segment error: No segment 5 in the Three layout (3 segments)");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_from_io() {
        let err = ConfigError::io(
            std::path::Path::new("/nope/config.json"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/nope/config.json"));
        assert!(err.to_string().contains("missing"));
    }
}
