//! Serializer
//!
//!     The structural inverse of the parser. Each container is written under its registered
//!     tag and every child goes inside an `elem` wrapper; map children put their key in the
//!     wrapper's `name` attribute:
//!
//!         Map      <aarray><elem name="KEY">child</elem>...</aarray>
//!         List     <sll><elem>child</elem>...</sll>      (or <dll>)
//!         String   the text, escaped
//!
//!     Output has no whitespace between tags, and map entries come out in key order, so the
//!     same value always serializes to the same bytes.
//!
//!     Parsing the output gives back an equal value as long as every string is one the scanner
//!     leaves alone: non-empty, no leading or trailing whitespace, no whitespace other than
//!     single spaces. [to_gxml] writes whatever it is given; [to_gxml_checked] refuses values
//!     that would come back changed.

use crate::gxml::chars::{classify, CharClass};
use crate::gxml::entities;
use crate::gxml::error::{LexicalError, SerializeError};
use crate::gxml::parsing::MAX_NESTING;
use crate::gxml::registry::{ContainerKind, TypeRegistry, ELEMENT_TAG, NAME_ATTRIBUTE};
use crate::gxml::wrapped::Wrapped;
use std::borrow::Cow;
use std::fmt;

/// Serialize a value to gXML text.
pub fn to_gxml(value: &Wrapped) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Serialize a value, refusing any value whose text would not parse back to it.
pub fn to_gxml_checked(value: &Wrapped) -> Result<String, SerializeError> {
    if value.as_str().is_some() {
        return Err(SerializeError::TopLevelString);
    }
    check_value(value, 0)?;
    Ok(to_gxml(value))
}

/// True when the scanner hands `text` back unchanged.
pub fn survives_scanning(text: &str) -> bool {
    let is_whitespace = |c: char| classify(Some(c)) == CharClass::Whitespace;
    !text.is_empty()
        && !text.starts_with(is_whitespace)
        && !text.ends_with(is_whitespace)
        && !text.contains("  ")
        && text.chars().all(|c| c == ' ' || !is_whitespace(c))
}

/// `open` counts the tags enclosing `value` in the output.
fn check_value(value: &Wrapped, open: usize) -> Result<(), SerializeError> {
    if let Wrapped::String(text) = value {
        if survives_scanning(text) {
            return Ok(());
        }
        return Err(SerializeError::UnstableText(text.clone()));
    }
    // the container tag, then an elem tag around each child
    let deepest = if value.is_empty() { open + 1 } else { open + 2 };
    if deepest > MAX_NESTING {
        return Err(SerializeError::TooDeep { limit: MAX_NESTING });
    }
    match value {
        Wrapped::List { items, .. } => items
            .iter()
            .try_for_each(|item| check_value(item, open + 2)),
        Wrapped::Map(entries) => entries
            .values()
            .try_for_each(|item| check_value(item, open + 2)),
        Wrapped::String(_) => Ok(()),
    }
}

fn write_value(out: &mut String, value: &Wrapped) {
    match value {
        Wrapped::String(text) => out.push_str(&escape(text)),
        Wrapped::List { kind, items } => {
            let tag = TypeRegistry::tag_name(ContainerKind::List(*kind));
            open_tag(out, tag);
            for item in items {
                open_tag(out, ELEMENT_TAG);
                write_value(out, item);
                close_tag(out, ELEMENT_TAG);
            }
            close_tag(out, tag);
        }
        Wrapped::Map(entries) => {
            let tag = TypeRegistry::tag_name(ContainerKind::Map);
            open_tag(out, tag);
            for (key, item) in entries {
                out.push('<');
                out.push_str(ELEMENT_TAG);
                out.push(' ');
                out.push_str(NAME_ATTRIBUTE);
                out.push_str("=\"");
                out.push_str(&escape(key));
                out.push_str("\">");
                write_value(out, item);
                close_tag(out, ELEMENT_TAG);
            }
            close_tag(out, tag);
        }
    }
}

fn open_tag(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Replace every entity-table literal with its `&name;` reference.
///
/// Borrows when nothing needs escaping.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(entities::is_special) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match entities::name_for(c) {
            Some(name) => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Resolve every `&name;` reference in `text`.
pub fn unescape(text: &str) -> Result<String, LexicalError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let reference = &rest[amp + 1..];
        let semi = reference
            .find(';')
            .ok_or(LexicalError::UnterminatedEntity)?;
        let name = &reference[..semi];
        let literal =
            entities::lookup(name).ok_or_else(|| LexicalError::UnknownEntity(name.to_string()))?;
        out.push(literal);
        rest = &reference[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Indented, human-readable rendering of a value, one node per line.
pub fn debug_dump(value: &Wrapped) -> String {
    DebugDump(value).to_string()
}

struct DebugDump<'a>(&'a Wrapped);

impl fmt::Display for DebugDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump_into(f, self.0, 0)
    }
}

fn dump_into(f: &mut fmt::Formatter<'_>, value: &Wrapped, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match value {
        Wrapped::String(text) => writeln!(f, "{}{:?}", indent, text),
        Wrapped::List { items, .. } => {
            writeln!(f, "{}{} ({})", indent, value.kind_name(), items.len())?;
            items.iter().try_for_each(|item| dump_into(f, item, depth + 1))
        }
        Wrapped::Map(entries) => {
            writeln!(f, "{}{} ({})", indent, value.kind_name(), entries.len())?;
            for (key, item) in entries {
                writeln!(f, "{}  [{}]", indent, key)?;
                dump_into(f, item, depth + 2)?;
            }
            Ok(())
        }
    }
}
