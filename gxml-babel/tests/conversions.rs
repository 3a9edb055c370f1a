//! Conversions between formats through the default registry

use gxml_babel::{FormatError, FormatRegistry};
use gxml_parser::gxml::testing::corpus;
use rstest::rstest;

#[rstest]
#[case::json("json")]
#[case::yaml("yaml")]
fn test_corpus_survives_a_trip_through(#[case] via: &str) {
    let registry = FormatRegistry::default();
    for (name, source) in corpus::ALL {
        let value = registry.parse(source, "gxml").unwrap();
        let text = registry.serialize(&value, via).unwrap();
        let back = registry.parse(&text, via).unwrap();
        // JSON and YAML have one list flavour; doubly linked lists come back singly linked.
        if !source.contains("<dll>") {
            assert_eq!(back, value, "{name} via {via}");
        }
        assert!(registry.serialize(&back, "gxml").is_ok(), "{name} via {via}");
    }
}

#[test]
fn test_json_to_gxml() {
    let registry = FormatRegistry::default();
    let gxml = registry
        .convert(r#"{"b": ["x", "y"], "a": "v"}"#, "json", "gxml")
        .unwrap();
    insta::assert_snapshot!(
        gxml,
        @r#"<aarray><elem name="a">v</elem><elem name="b"><sll><elem>x</elem><elem>y</elem></sll></elem></aarray>"#
    );
}

#[test]
fn test_gxml_to_compact_json() {
    let mut registry = FormatRegistry::default();
    registry.register(gxml_babel::formats::JsonFormat::compact());
    let json = registry
        .convert(corpus::ESCAPED_TEXT, "gxml", "json")
        .unwrap();
    assert_eq!(json, r#"{"foo":["<A>"]}"#);
}

#[test]
fn test_gxml_to_treeviz() {
    let registry = FormatRegistry::default();
    let tree = registry.convert(corpus::DEEP_MIX, "gxml", "treeviz").unwrap();
    insta::assert_snapshot!(tree.trim_end(), @r###"
    ⧉ aarray (1)
    └─ foo: ☰ sll (2)
      ├─ ¶ "A"
      └─ ⧉ aarray (1)
        └─ foo: ¶ "BAR"
    "###);
}

#[test]
fn test_json_string_cannot_become_a_document() {
    let registry = FormatRegistry::default();
    let result = registry.convert(r#""just text""#, "json", "gxml");
    assert!(matches!(result, Err(FormatError::SerializationError(_))));
}

#[rstest]
#[case::empty_string(r#"{"c": ""}"#, r#""""#)]
#[case::padded_text(r#"{"b": " lead"}"#, r#"" lead""#)]
#[case::whitespace_run(r#"{"a": "x  y"}"#, r#""x  y""#)]
#[case::newline_in_list(r#"[["line\nbreak"]]"#, r#""line\nbreak""#)]
fn test_json_text_that_gxml_would_rewrite_is_refused(#[case] json: &str, #[case] shown: &str) {
    let registry = FormatRegistry::default();
    let err = registry.convert(json, "json", "gxml").unwrap_err();
    assert!(matches!(err, FormatError::SerializationError(_)), "{json}: {err:?}");
    assert!(err.to_string().contains(shown), "{json}: {err}");
}

#[test]
fn test_json_keys_keep_their_whitespace() {
    let registry = FormatRegistry::default();
    let gxml = registry.convert(r#"{"two  words ": "v"}"#, "json", "gxml").unwrap();
    let back = registry.convert(&gxml, "gxml", "json").unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&back).unwrap(),
        serde_json::json!({"two  words ": "v"})
    );
}

#[test]
fn test_treeviz_is_output_only() {
    let registry = FormatRegistry::default();
    assert!(matches!(
        registry.parse("anything", "treeviz"),
        Err(FormatError::NotSupported(_))
    ));
}

#[test]
fn test_malformed_gxml_reports_the_parse_error() {
    let registry = FormatRegistry::default();
    let err = registry.convert("<sll><elem>&bogus;</elem></sll>", "gxml", "json").unwrap_err();
    assert!(err.to_string().starts_with("lexical error"));
}
