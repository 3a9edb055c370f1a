//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing wrapped values.

use crate::error::FormatError;
use gxml_parser::Wrapped;

/// Trait for value formats
///
/// Implementors provide conversion between a string representation and a [Wrapped] value.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, value: &Wrapped) -> Result<String, FormatError> {
///         Ok(format!("{:?}", value))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "gxml", "json")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions (without the dot) that identify this format
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a value
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Wrapped, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a value into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _value: &Wrapped) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
