//! gxml format implementation
//!
//! The wire format itself, treated as just another format so every conversion goes through
//! the same interface. Parsing and serialization delegate to gxml-parser.

use crate::error::FormatError;
use crate::format::Format;
use gxml_parser::{parse, to_gxml_checked, Wrapped};

pub struct GxmlFormat;

impl Format for GxmlFormat {
    fn name(&self) -> &str {
        "gxml"
    }

    fn description(&self) -> &str {
        "gXML wrapped-value format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["gxml", "xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Wrapped, FormatError> {
        Ok(parse(source)?)
    }

    /// Refuses values that would parse back differently: a bare string, text the scanner
    /// would rewrite, or nesting past the parser's limit.
    fn serialize(&self, value: &Wrapped) -> Result<String, FormatError> {
        Ok(to_gxml_checked(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let format = GxmlFormat;
        let source = r#"<aarray><elem name="k">v</elem></aarray>"#;
        let value = format.parse(source).unwrap();
        assert_eq!(format.serialize(&value).unwrap(), source);
    }

    #[test]
    fn test_parse_error_is_kept() {
        match GxmlFormat.parse("<sll></dll>") {
            Err(FormatError::ParseError(err)) => assert!(err.is_syntax()),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_text_that_would_change_is_rejected() {
        let value = Wrapped::map([("k", Wrapped::string("two  spaces"))]);
        match GxmlFormat.serialize(&value) {
            Err(FormatError::SerializationError(msg)) => assert!(msg.contains("two  spaces")),
            other => panic!("Expected SerializationError, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_string_is_rejected() {
        let result = GxmlFormat.serialize(&Wrapped::string("bare"));
        assert!(matches!(result, Err(FormatError::SerializationError(_))));
    }
}
