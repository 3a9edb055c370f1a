//! Error types for format conversions

use gxml_parser::{ParseError, SerializeError};
use std::fmt;

#[derive(Debug)]
pub enum FormatError {
    FormatNotFound(String),
    NotSupported(String),
    /// Malformed gxml input
    ParseError(ParseError),
    /// The value cannot be written in the target format
    SerializationError(String),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{}' not found", name),
            FormatError::NotSupported(msg) => write!(f, "{}", msg),
            FormatError::ParseError(err) => write!(f, "{}", err),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            FormatError::Json(err) => write!(f, "JSON error: {}", err),
            FormatError::Yaml(err) => write!(f, "YAML error: {}", err),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::ParseError(err) => Some(err),
            FormatError::Json(err) => Some(err),
            FormatError::Yaml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for FormatError {
    fn from(err: ParseError) -> Self {
        FormatError::ParseError(err)
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Json(err)
    }
}

impl From<serde_yaml::Error> for FormatError {
    fn from(err: serde_yaml::Error) -> Self {
        FormatError::Yaml(err)
    }
}

impl From<SerializeError> for FormatError {
    fn from(err: SerializeError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}
