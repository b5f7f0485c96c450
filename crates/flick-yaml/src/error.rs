//! Error types for attribute parsing.

use flick_core::ColorParseError;
use thiserror::Error;

/// Error type for attribute parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax error, wrong value type or unknown key
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A color attribute that is not a hex color
    #[error("Invalid color for '{field}': {value:?} ({source})")]
    InvalidColor {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
        /// Why it did not parse
        #[source]
        source: ColorParseError,
    },

    /// A value of the right type outside its allowed range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidValue {
            field: "text_size",
            message: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'text_size': must be positive"
        );

        let err = ParseError::InvalidColor {
            field: "on_background",
            value: "#zz0000".to_string(),
            source: ColorParseError::InvalidHex,
        };
        assert_eq!(
            err.to_string(),
            "Invalid color for 'on_background': \"#zz0000\" (invalid hex characters)"
        );
    }

    #[test]
    fn test_parse_error_source() {
        let err = ParseError::InvalidColor {
            field: "thumb_background",
            value: "#123".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert!(err.source().is_some());

        let err = ParseError::InvalidValue {
            field: "text_size",
            message: "x".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not a number")
            .err()
            .expect("parse must fail");
        let err: ParseError = yaml_err.into();
        assert!(matches!(err, ParseError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML error:"));
    }
}
