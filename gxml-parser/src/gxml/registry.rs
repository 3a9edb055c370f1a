//! Type registry
//!
//!     The closed set of tag names that build containers. Looking a tag up here is how the
//!     parser decides whether a tag makes a value of its own or is a transparent wrapper
//!     whose children belong to the enclosing container.
//!
//!     Tag     Container
//!     ------  ---------------------------------
//!     aarray  Map (associative array)
//!     sll     List, singly linked flavour
//!     dll     List, doubly linked flavour
//!
//!     Both list flavours behave the same; the tag is kept so values round-trip to producers
//!     that tell them apart.

use crate::gxml::wrapped::{ListKind, Wrapped};
use std::collections::BTreeMap;

/// Tag the serializer writes around each container element. Never registered.
pub const ELEMENT_TAG: &str = "elem";

/// Attribute that carries a map element's key.
pub const NAME_ATTRIBUTE: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Map,
    List(ListKind),
}

const REGISTERED: &[(&str, ContainerKind)] = &[
    ("aarray", ContainerKind::Map),
    ("sll", ContainerKind::List(ListKind::Singly)),
    ("dll", ContainerKind::List(ListKind::Doubly)),
];

pub struct TypeRegistry;

impl TypeRegistry {
    /// Container kind for an already case-folded tag name.
    pub fn lookup(tag: &str) -> Option<ContainerKind> {
        REGISTERED
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
    }

    /// Empty container of the given kind.
    pub fn construct(kind: ContainerKind) -> Wrapped {
        match kind {
            ContainerKind::Map => Wrapped::Map(BTreeMap::new()),
            ContainerKind::List(kind) => Wrapped::List {
                kind,
                items: Vec::new(),
            },
        }
    }

    pub fn tag_name(kind: ContainerKind) -> &'static str {
        REGISTERED
            .iter()
            .find(|(_, registered)| *registered == kind)
            .map(|(name, _)| *name)
            .unwrap_or(ELEMENT_TAG)
    }

    pub fn tags() -> impl Iterator<Item = &'static str> {
        REGISTERED.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(TypeRegistry::lookup("aarray"), Some(ContainerKind::Map));
        assert_eq!(
            TypeRegistry::lookup("sll"),
            Some(ContainerKind::List(ListKind::Singly))
        );
        assert_eq!(
            TypeRegistry::lookup("dll"),
            Some(ContainerKind::List(ListKind::Doubly))
        );
        assert_eq!(TypeRegistry::lookup("elem"), None);
        assert_eq!(TypeRegistry::lookup("string"), None);
    }

    #[test]
    fn test_construct_is_empty() {
        assert_eq!(
            TypeRegistry::construct(ContainerKind::Map),
            Wrapped::Map(BTreeMap::new())
        );
        assert_eq!(
            TypeRegistry::construct(ContainerKind::List(ListKind::Doubly)),
            Wrapped::dll(Vec::new())
        );
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in TypeRegistry::tags() {
            let kind = TypeRegistry::lookup(tag).unwrap();
            assert_eq!(TypeRegistry::tag_name(kind), tag);
        }
    }
}
