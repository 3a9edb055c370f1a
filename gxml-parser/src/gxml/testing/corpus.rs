//! Known-good documents
//!
//!     Each constant is a complete document as a producer would send it. [ALL] lists them in
//!     a fixed order for table-driven tests.

use crate::gxml::error::ParseError;
use crate::gxml::parsing;
use crate::gxml::wrapped::Wrapped;

pub const SIMPLE_MAP: &str = r#"<aarray><elem name="foo">bar</elem></aarray>"#;

/// Opening and closing tags differ only in case.
pub const MIXED_CASE_SLL: &str = "<SLL><elem>A</elem><elem>B</elem></sll>";

pub const NESTED_DLL: &str = "<dll><elem><dll><elem>a</elem></dll></elem></dll>";

pub const FLAT_DLL: &str = "<dll><elem>A</elem><elem>B</elem></dll>";

pub const NESTED_MAP_IN_LIST: &str =
    r#"<sll><elem><aarray><elem name="foo">A</elem></aarray></elem></sll>"#;

/// Entities and uneven whitespace inside one text run.
pub const GETTYSBURG: &str = "<sll><elem>&nbsp;Four\t  score&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;and seven years ago, our fathers brought forth onto this continent...    </elem></sll>";

pub const ESCAPED_TEXT: &str =
    r#"<aarray><elem name="foo"><sll><elem>&lt;A&gt;</elem></sll></elem></aarray>"#;

pub const DEEP_MIX: &str = r#"<aarray><elem name="foo"><sll><elem>A</elem><elem><aarray><elem name="foo">BAR</elem></aarray></elem></sll></elem></aarray>"#;

pub const ALL: &[(&str, &str)] = &[
    ("simple_map", SIMPLE_MAP),
    ("mixed_case_sll", MIXED_CASE_SLL),
    ("nested_dll", NESTED_DLL),
    ("flat_dll", FLAT_DLL),
    ("nested_map_in_list", NESTED_MAP_IN_LIST),
    ("gettysburg", GETTYSBURG),
    ("escaped_text", ESCAPED_TEXT),
    ("deep_mix", DEEP_MIX),
];

/// Look a document up by its name in [ALL].
pub fn document(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, source)| *source)
}

pub fn parse(source: &str) -> Result<Wrapped, ParseError> {
    parsing::parse(source)
}
