//! Main module for gxml library functionality

pub mod chars;
pub mod entities;
pub mod error;
pub mod parsing;
pub mod registry;
pub mod scanning;
pub mod serializing;
pub mod testing;
pub mod token;
pub mod wrapped;
