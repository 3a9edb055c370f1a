//! # gxml
//!
//! Scanner, parser and serializer for the gxml format: a restricted XML-like text
//! representation of generic container values (maps, lists and strings).
//!
//! File Layout
//!
//!     src/gxml
//!       ├── chars        Character classification for the scanner automaton
//!       ├── entities     The static entity table (`&amp;` and friends)
//!       ├── token        Token kinds and source positions
//!       ├── scanning     The finite-state scanner and its transition table
//!       ├── registry     Reserved tag names and the containers they build
//!       ├── wrapped      The Wrapped value tree and its insert operation
//!       ├── parsing      Recursive-descent parser over the token stream
//!       ├── serializing  Wrapped tree back to text, plus escaping
//!       └── testing      Sample documents and fluent assertions for the test suites
//!
//! The contract is simple: `parse(to_gxml(v))` gives back `v` for every value built from
//! normalized strings, and `to_gxml(parse(s))` is stable after the first generation.

pub mod gxml;

pub use gxml::error::{ParseError, ParseErrorKind, SerializeError};
pub use gxml::parsing::{parse, parse_with_diagnostic, ParseOutcome, MAX_NESTING};
pub use gxml::serializing::{escape, survives_scanning, to_gxml, to_gxml_checked, unescape};
pub use gxml::wrapped::{ListKind, Wrapped};
