use crate::domain::model::{RoundTripStage, TextComparison};
use thiserror::Error;

/// Boxed error returned by validation callbacks and bundled by `AggregateError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("Deserialization of the {stage} text returned no value")]
    NullResultError { stage: RoundTripStage },

    #[error(
        "{comparison} mismatch at byte {position}:\n  expected: {expected}\n  actual:   {actual}"
    )]
    MismatchError {
        comparison: TextComparison,
        expected: String,
        actual: String,
        position: usize,
    },

    #[error("Validation of the {stage} value failed: {source}")]
    ValidationError {
        stage: RoundTripStage,
        source: BoxError,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XML deserialization error: {0}")]
    XmlDeError(#[from] quick_xml::DeError),

    #[error("XML serialization error: {0}")]
    XmlSeError(#[from] quick_xml::SeError),

    #[error("TOML deserialization error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSeError(#[from] toml::ser::Error),

    #[error("Serialized output is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    RoundTrip,
    Codec,
    Configuration,
    Io,
}

impl TestkitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TestkitError::NullResultError { .. }
            | TestkitError::MismatchError { .. }
            | TestkitError::ValidationError { .. } => ErrorCategory::RoundTrip,
            TestkitError::JsonError(_)
            | TestkitError::XmlDeError(_)
            | TestkitError::XmlSeError(_)
            | TestkitError::TomlDeError(_)
            | TestkitError::TomlSeError(_)
            | TestkitError::EncodingError(_) => ErrorCategory::Codec,
            TestkitError::ConfigError { .. } | TestkitError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            TestkitError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TestkitError::NullResultError { .. } => {
                "The serialized text decodes to an empty value; check the fixture content"
            }
            TestkitError::MismatchError {
                comparison: TextComparison::OriginalText,
                ..
            } => "Disable the original text comparison, or align the fixture formatting with the codec options",
            TestkitError::MismatchError { .. } => {
                "The type's serialized form is not stable; look for unordered collections or lossy fields"
            }
            TestkitError::ValidationError { .. } => {
                "A field did not survive the round trip; check serde attributes on the type under test"
            }
            TestkitError::ConfigError { .. } | TestkitError::InvalidConfigValueError { .. } => {
                "Check the configuration file values"
            }
            TestkitError::IoError(_) => "Make sure the fixture file exists and is readable",
            _ => "Make sure the input text is valid for the selected format",
        }
    }
}

pub type Result<T> = std::result::Result<T, TestkitError>;
