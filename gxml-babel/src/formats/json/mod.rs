//! JSON format implementation
//!
//! Maps to objects, lists to arrays, strings to strings. Inbound numbers and booleans are
//! kept as their text; `null` is an error.

use crate::error::FormatError;
use crate::format::Format;
use gxml_parser::Wrapped;

pub struct JsonFormat {
    pub pretty: bool,
}

impl JsonFormat {
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON (serde_json)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Wrapped, FormatError> {
        Ok(serde_json::from_str(source)?)
    }

    fn serialize(&self, value: &Wrapped) -> Result<String, FormatError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let value = Wrapped::map([("k", Wrapped::dll(vec!["a".into()]))]);
        assert_eq!(
            JsonFormat::compact().serialize(&value).unwrap(),
            r#"{"k":["a"]}"#
        );
    }

    #[test]
    fn test_parse_nested() {
        let value = JsonFormat::default()
            .parse(r#"{"a": {"b": ["x", 2]}}"#)
            .unwrap();
        assert_eq!(
            value,
            Wrapped::map([(
                "a",
                Wrapped::map([("b", Wrapped::sll(vec!["x".into(), "2".into()]))])
            )])
        );
    }

    #[test]
    fn test_null_is_an_error() {
        assert!(matches!(
            JsonFormat::default().parse("[null]"),
            Err(FormatError::Json(_))
        ));
    }
}
