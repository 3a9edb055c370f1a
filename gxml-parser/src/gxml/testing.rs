//! Testing utilities
//!
//!     Two tools keep parser tests honest:
//!
//!         1. The [corpus] of known-good documents, covering what real producers
//!            send. Prefer these over inventing samples inline; a hand-written document
//!            that is slightly off tests the wrong thing.
//!         2. Fluent value assertions via [assert_wrapped]. Walking a `Wrapped` tree by hand
//!            with nested matches is verbose and tends to check only shallow properties.
//!
//!     ```rust,ignore
//!     use gxml_parser::gxml::testing::{assert_wrapped, corpus};
//!
//!     let value = corpus::parse(corpus::NESTED_MAP_IN_LIST).unwrap();
//!     assert_wrapped(&value)
//!         .assert_list()
//!         .item_count(1)
//!         .item(0, |item| {
//!             item.assert_map().entry("foo", |v| v.is_string("A"));
//!         });
//!     ```

pub mod assertions;
pub mod corpus;

pub use assertions::{assert_wrapped, ListAssertion, MapAssertion, ValueAssertion};
