//! Error types for the chroma_palette library

use thiserror::Error;

/// Result type alias for chroma_palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Error conditions raised by the color engine
///
/// Only input validation can fail: once a palette exists, analysis and
/// optimization are total over it.
#[derive(Error, Debug)]
pub enum PaletteError {
    /// A hex color string could not be parsed
    #[error("Invalid color format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    /// Image, region or palette had nothing to work with
    #[error("Empty input: {reason}")]
    EmptyInput { reason: String },

    /// Requested number of colors was zero
    #[error("Invalid count: {count} (at least 1 color must be requested)")]
    InvalidCount { count: usize },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Region does not overlap the image
    #[error("Region {x},{y} {width}x{height} lies outside the {image_width}x{image_height} image")]
    InvalidRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Configuration file could not be read, written or decoded
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Background extraction worker stopped without delivering a result
    #[error("Background task failed: {reason}")]
    TaskFailed { reason: String },
}

impl PaletteError {
    /// Create an invalid format error for a rejected input string
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty input error
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Recoverable errors are caused by the request (bad text, bad count,
    /// bad region) and go away when the user corrects it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaletteError::InvalidFormat { .. }
                | PaletteError::InvalidCount { .. }
                | PaletteError::InvalidRegion { .. }
                | PaletteError::TaskFailed { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidFormat { input, .. } => {
                format!("'{}' is not a valid hex color. Use #RGB, #RRGGBB or #AARRGGBB.", input)
            }
            PaletteError::EmptyInput { .. } => {
                "The image has no pixels to sample. Please choose a different photo.".to_string()
            }
            PaletteError::InvalidCount { .. } => {
                "Please request at least one color.".to_string()
            }
            PaletteError::InvalidRegion { .. } => {
                "The selected area is outside the image. Please select again.".to_string()
            }
            _ => "Palette generation failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PaletteError::invalid_format("#12", "expected 3, 6 or 8 hex digits");
        assert_eq!(
            err.to_string(),
            "Invalid color format '#12': expected 3, 6 or 8 hex digits"
        );

        let err = PaletteError::InvalidCount { count: 0 };
        assert!(err.to_string().contains("Invalid count: 0"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(PaletteError::InvalidCount { count: 0 }.is_recoverable());
        assert!(PaletteError::invalid_format("zz", "bad").is_recoverable());
        assert!(!PaletteError::empty("zero-area image").is_recoverable());
        assert!(!PaletteError::invalid_parameter("bucket_bits", 9).is_recoverable());
    }

    #[test]
    fn test_config_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PaletteError::config("cannot read config.json", io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_user_message_mentions_input() {
        let err = PaletteError::invalid_format("#GGG", "non-hex character");
        assert!(err.user_message().contains("#GGG"));
    }
}
