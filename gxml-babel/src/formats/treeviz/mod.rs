//! Tree visualization of a wrapped value
//!
//! Output only. One line per node with box-drawing connectors; map entries are prefixed
//! with their key.
//!
//! ## Example
//!
//! ```text
//! ⧉ aarray (2)
//! ├─ list: ☰ dll (2)
//! │ ├─ ¶ "a"
//! │ └─ ¶ "b"
//! └─ name: ¶ "x"
//! ```

use crate::error::FormatError;
use crate::format::Format;
use gxml_parser::Wrapped;

fn icon(value: &Wrapped) -> &'static str {
    match value {
        Wrapped::String(_) => "¶",
        Wrapped::List { .. } => "☰",
        Wrapped::Map(_) => "⧉",
    }
}

fn label(value: &Wrapped) -> String {
    match value {
        Wrapped::String(text) => format!("{} {:?}", icon(value), text),
        _ => format!("{} {} ({})", icon(value), value.kind_name(), value.len()),
    }
}

fn children(value: &Wrapped) -> Vec<(Option<&str>, &Wrapped)> {
    match value {
        Wrapped::String(_) => Vec::new(),
        Wrapped::List { items, .. } => items.iter().map(|item| (None, item)).collect(),
        Wrapped::Map(entries) => entries
            .iter()
            .map(|(key, item)| (Some(key.as_str()), item))
            .collect(),
    }
}

fn format_node(
    output: &mut String,
    key: Option<&str>,
    value: &Wrapped,
    prefix: &str,
    is_last: bool,
) {
    let connector = if is_last { "└─" } else { "├─" };
    match key {
        Some(key) => output.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            key,
            label(value)
        )),
        None => output.push_str(&format!("{}{} {}\n", prefix, connector, label(value))),
    }

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let nodes = children(value);
    let count = nodes.len();
    for (i, (key, child)) in nodes.into_iter().enumerate() {
        format_node(output, key, child, &child_prefix, i == count - 1);
    }
}

pub fn to_treeviz_str(value: &Wrapped) -> String {
    let mut output = format!("{}\n", label(value));
    let nodes = children(value);
    let count = nodes.len();
    for (i, (key, child)) in nodes.into_iter().enumerate() {
        format_node(&mut output, key, child, "", i == count - 1);
    }
    output
}

pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation of the value"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, value: &Wrapped) -> Result<String, FormatError> {
        Ok(to_treeviz_str(value))
    }
}
