//! Fluent assertions over wrapped values
//!
//!     Every builder carries a context path such as `root[2]{foo}` so a failure names the
//!     node it happened at.

use crate::gxml::wrapped::{ListKind, Wrapped};

/// Create an assertion builder for a value.
pub fn assert_wrapped(value: &Wrapped) -> ValueAssertion<'_> {
    ValueAssertion {
        value,
        context: "root".to_string(),
    }
}

pub struct ValueAssertion<'a> {
    pub(crate) value: &'a Wrapped,
    pub(crate) context: String,
}

impl<'a> ValueAssertion<'a> {
    pub fn is_string(self, expected: &str) -> Self {
        match self.value {
            Wrapped::String(actual) => assert_eq!(
                actual, expected,
                "{}: Expected string {:?}, found {:?}",
                self.context, expected, actual
            ),
            other => panic!(
                "{}: Expected string {:?}, found {}",
                self.context,
                expected,
                other.kind_name()
            ),
        }
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        match self.value.as_str() {
            Some(actual) => assert!(
                actual.contains(needle),
                "{}: Expected text containing {:?}, found {:?}",
                self.context,
                needle,
                actual
            ),
            None => panic!(
                "{}: Expected string, found {}",
                self.context,
                self.value.kind_name()
            ),
        }
        self
    }

    pub fn assert_map(self) -> MapAssertion<'a> {
        match self.value {
            Wrapped::Map(_) => MapAssertion {
                value: self.value,
                context: self.context,
            },
            other => panic!(
                "{}: Expected aarray, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }

    pub fn assert_list(self) -> ListAssertion<'a> {
        match self.value {
            Wrapped::List { items, kind } => ListAssertion {
                items,
                kind: *kind,
                context: self.context,
            },
            other => panic!(
                "{}: Expected list, found {}",
                self.context,
                other.kind_name()
            ),
        }
    }
}

pub struct MapAssertion<'a> {
    value: &'a Wrapped,
    context: String,
}

impl<'a> MapAssertion<'a> {
    pub fn entry_count(self, expected: usize) -> Self {
        let actual = self.value.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} entries, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Keys in sorted order.
    pub fn keys(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .value
            .as_map()
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(actual, expected, "{}: Unexpected keys", self.context);
        self
    }

    pub fn entry<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let value = match self.value.get(key) {
            Some(value) => value,
            None => panic!(
                "{}: Missing key {:?} (keys: {:?})",
                self.context,
                key,
                self.value
                    .as_map()
                    .map(|entries| entries.keys().collect::<Vec<_>>())
                    .unwrap_or_default()
            ),
        };
        assertion(ValueAssertion {
            value,
            context: format!("{}{{{}}}", self.context, key),
        });
        self
    }
}

pub struct ListAssertion<'a> {
    items: &'a [Wrapped],
    kind: ListKind,
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn kind(self, expected: ListKind) -> Self {
        assert_eq!(
            self.kind, expected,
            "{}: Expected {:?} list, found {:?}",
            self.context, expected, self.kind
        );
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.items.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} list items, found {} list items",
            self.context, expected, actual
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        assert!(
            index < self.items.len(),
            "{}: Item index {} out of bounds (list has {} items)",
            self.context,
            index,
            self.items.len()
        );
        let items = self.items;
        assertion(ValueAssertion {
            value: &items[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }
}
