//! Wrapped values
//!
//!     The tree the parser builds and the serializer walks. A value is a string leaf, an
//!     ordered list, or a map keyed by string. Children are owned outright; the parser only
//!     ever inserts finished children into their parent, so the tree cannot share nodes or
//!     form cycles, and dropping the root releases everything below it.
//!
//!     Lists come in two flavours, singly and doubly linked, named after the containers of
//!     the producers that write them. They are the same ordered sequence here and only the
//!     tag written on output differs.
//!
//!     With serde, a value maps onto the natural data model: strings, sequences and maps.
//!     Sequences deserialize as singly linked lists, and scalars (numbers, booleans) become
//!     their string form.

use crate::gxml::error::{ParseError, SemanticError, SyntaxError};
use crate::gxml::registry::NAME_ATTRIBUTE;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attributes of one open tag.
pub type AttributeMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Singly,
    Doubly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapped {
    String(String),
    List { kind: ListKind, items: Vec<Wrapped> },
    Map(BTreeMap<String, Wrapped>),
}

impl Wrapped {
    pub fn string(text: impl Into<String>) -> Self {
        Wrapped::String(text.into())
    }

    pub fn sll(items: Vec<Wrapped>) -> Self {
        Wrapped::List {
            kind: ListKind::Singly,
            items,
        }
    }

    pub fn dll(items: Vec<Wrapped>) -> Self {
        Wrapped::List {
            kind: ListKind::Doubly,
            items,
        }
    }

    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Wrapped)>,
    {
        Wrapped::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Insert a parsed child, using the attributes of the tag it came from.
    ///
    /// Maps take the key from the `name` attribute and refuse duplicates; lists append and
    /// ignore attributes; strings hold no children.
    pub fn insert(&mut self, child: Wrapped, attrs: &AttributeMap) -> Result<(), ParseError> {
        match self {
            Wrapped::Map(entries) => {
                let key = attrs
                    .get(NAME_ATTRIBUTE)
                    .ok_or(SyntaxError::MissingNameAttribute)?;
                if entries.contains_key(key) {
                    return Err(SemanticError::DuplicateKey(key.clone()).into());
                }
                log::debug!("map insert '{}' <- {}", key, child.kind_name());
                entries.insert(key.clone(), child);
                Ok(())
            }
            Wrapped::List { items, .. } => {
                log::debug!("list append #{} <- {}", items.len(), child.kind_name());
                items.push(child);
                Ok(())
            }
            Wrapped::String(_) => Err(SyntaxError::InsertIntoString.into()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Wrapped::String(_) => "string",
            Wrapped::List {
                kind: ListKind::Singly,
                ..
            } => "sll",
            Wrapped::List {
                kind: ListKind::Doubly,
                ..
            } => "dll",
            Wrapped::Map(_) => "aarray",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Wrapped::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Wrapped]> {
        match self {
            Wrapped::List { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Wrapped>> {
        match self {
            Wrapped::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Map entry by key.
    pub fn get(&self, key: &str) -> Option<&Wrapped> {
        self.as_map().and_then(|entries| entries.get(key))
    }

    /// Number of direct children; strings have none.
    pub fn len(&self) -> usize {
        match self {
            Wrapped::String(_) => 0,
            Wrapped::List { items, .. } => items.len(),
            Wrapped::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest nesting level, counting this value as 1.
    pub fn depth(&self) -> usize {
        let children = match self {
            Wrapped::String(_) => return 1,
            Wrapped::List { items, .. } => items.iter().map(Wrapped::depth).max(),
            Wrapped::Map(entries) => entries.values().map(Wrapped::depth).max(),
        };
        1 + children.unwrap_or(0)
    }
}

impl From<&str> for Wrapped {
    fn from(text: &str) -> Self {
        Wrapped::String(text.to_string())
    }
}

impl From<String> for Wrapped {
    fn from(text: String) -> Self {
        Wrapped::String(text)
    }
}

impl Serialize for Wrapped {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Wrapped::String(s) => serializer.serialize_str(s),
            Wrapped::List { items, .. } => serializer.collect_seq(items),
            Wrapped::Map(entries) => serializer.collect_map(entries),
        }
    }
}

struct WrappedVisitor;

impl<'de> Visitor<'de> for WrappedVisitor {
    type Value = Wrapped;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean, sequence or map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Wrapped, E> {
        Ok(Wrapped::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Wrapped, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Wrapped::sll(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Wrapped, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Wrapped>()? {
            if entries.contains_key(&key) {
                return Err(de::Error::custom(SemanticError::DuplicateKey(key)));
            }
            entries.insert(key, value);
        }
        Ok(Wrapped::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Wrapped {
    fn deserialize<D>(deserializer: D) -> Result<Wrapped, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WrappedVisitor)
    }
}
