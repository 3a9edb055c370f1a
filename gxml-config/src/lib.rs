//! Shared configuration loader for the gxml tools.
//!
//! `defaults/gxml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`GxmlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/gxml.default.toml");

/// Name of the per-directory configuration file the CLI picks up.
pub const LOCAL_CONFIG_FILE: &str = "gxml.toml";

/// Top-level configuration consumed by gxml applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GxmlConfig {
    pub convert: ConvertConfig,
    pub check: CheckConfig,
    pub tokens: TokensConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub default_output: String,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub second_generation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub show_positions: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GxmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GxmlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.convert.default_output, "gxml");
        assert!(config.convert.pretty);
        assert!(config.check.second_generation);
        assert!(config.tokens.show_positions);
    }

    #[test]
    fn user_file_overrides_only_what_it_names() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[check]\nsecond_generation = false").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.check.second_generation);
        assert_eq!(config.convert.default_output, "gxml");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/gxml.toml")
            .build()
            .expect("config to build");
        assert!(config.convert.pretty);
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/gxml.toml")
            .build()
            .is_err());
    }
}
