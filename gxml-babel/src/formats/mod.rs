//! Format implementations
//!
//! This module contains all format implementations that convert between
//! wrapped values and various text representations.

pub mod gxml;
pub mod json;
pub mod treeviz;
pub mod yaml;

pub use gxml::GxmlFormat;
pub use json::JsonFormat;
pub use treeviz::TreevizFormat;
pub use yaml::YamlFormat;
