//! Multi-format interoperability for gxml values
//!
//!     This crate converts between the gxml wire format and other representations of the
//!     same generic values. Every format goes through the one shared value tree,
//!     [Wrapped](gxml_parser::Wrapped), so any inbound format can be written out as any
//!     outbound one.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: centralized discovery and selection of formats
//!     - Format implementations: one module per format under `formats/`
//!
//!     This is a pure lib: it powers gxml-cli but assumes no shell. No printing, no
//!     environment variables, no file access.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── gxml                # the wire format itself
//!     │   ├── json                # serde_json
//!     │   ├── yaml                # serde_yaml
//!     │   └── treeviz             # human-readable tree, output only
//!     └── lib.rs
//!
//! Lossiness
//!
//!     gxml has only strings, lists and maps. Numbers and booleans coming in from JSON or
//!     YAML become their string form, both list flavours come out as plain sequences, and
//!     `null` has no representation at all and is rejected.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
