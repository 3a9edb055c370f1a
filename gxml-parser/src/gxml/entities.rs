//! Entity table
//!
//!     A closed, static mapping from entity names to the single literal character each one
//!     stands for. The scanner resolves `&name;` through [lookup] and the serializer replaces
//!     every literal found in [ENTITIES] with its reference, so both directions always agree.
//!
//!     The table is a constant. Name lookups go through an index that is built once, on first
//!     use, behind a `Lazy` barrier; after that every reader shares it without locking.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub name: &'static str,
    pub literal: char,
}

/// Every entity the format knows about. `amp` must stay first so that escaping never
/// produces a bare ampersand.
pub const ENTITIES: &[Entity] = &[
    Entity { name: "amp", literal: '&' },
    Entity { name: "lt", literal: '<' },
    Entity { name: "gt", literal: '>' },
    Entity { name: "quot", literal: '"' },
    Entity { name: "apos", literal: '\'' },
    Entity { name: "nbsp", literal: '\u{a0}' },
];

static BY_NAME: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    ENTITIES
        .iter()
        .map(|entity| (entity.name, entity.literal))
        .collect()
});

/// Resolve an entity name (the text between `&` and `;`) to its literal character.
pub fn lookup(name: &str) -> Option<char> {
    BY_NAME.get(name).copied()
}

/// The entity name that escapes `literal`, if it is special.
pub fn name_for(literal: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|entity| entity.literal == literal)
        .map(|entity| entity.name)
}

/// Whether `c` must be written as an entity reference.
pub fn is_special(c: char) -> bool {
    name_for(c).is_some()
}
