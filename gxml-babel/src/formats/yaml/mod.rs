//! YAML format implementation

use crate::error::FormatError;
use crate::format::Format;
use gxml_parser::Wrapped;

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML (serde_yaml)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Wrapped, FormatError> {
        Ok(serde_yaml::from_str(source)?)
    }

    fn serialize(&self, value: &Wrapped) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_round_trip() {
        let value = Wrapped::map([
            ("list", Wrapped::sll(vec!["a".into(), "b".into()])),
            ("name", Wrapped::string("x")),
        ]);
        let text = YamlFormat.serialize(&value).unwrap();
        assert_eq!(text, "list:\n- a\n- b\nname: x\n");
        assert_eq!(YamlFormat.parse(&text).unwrap(), value);
    }

    #[test]
    fn test_scalars_become_strings() {
        let value = YamlFormat.parse("count: 3\nflag: true\n").unwrap();
        assert_eq!(value.get("count"), Some(&Wrapped::string("3")));
        assert_eq!(value.get("flag"), Some(&Wrapped::string("true")));
    }
}
