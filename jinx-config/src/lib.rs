//! Settings for the jinx tools.
//!
//! The baseline lives in `defaults/jinx.default.toml` and is compiled into the crate, so a
//! binary always starts from a complete configuration. Project and user TOML files are
//! stacked on that baseline with [`Loader`], and the merged result deserializes into
//! [`JinxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use jinx_parser::jinx::formats::{FormatError, OutputFormat};
use jinx_parser::{FileSystemLoader, ResolveOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/jinx.default.toml");

/// Top-level configuration consumed by jinx applications.
#[derive(Debug, Clone, Deserialize)]
pub struct JinxConfig {
    pub templates: TemplatesConfig,
    pub resolver: ResolverConfig,
    pub output: OutputConfig,
}

/// Where templates are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    pub root: PathBuf,
}

impl TemplatesConfig {
    pub fn loader(&self) -> FileSystemLoader {
        FileSystemLoader::new(&self.root)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    pub detect_cycles: bool,
}

impl From<&ResolverConfig> for ResolveOptions {
    fn from(config: &ResolverConfig) -> Self {
        ResolveOptions {
            detect_cycles: config.detect_cycles,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

impl OutputConfig {
    /// The configured format, checked against the known names.
    pub fn format(&self) -> Result<OutputFormat, FormatError> {
        self.format.parse()
    }
}

/// Stacks configuration sources; later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A stack holding only the compiled-in baseline.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Push a TOML file that has to exist; `build` fails otherwise.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Push a TOML file that is skipped when absent, such as a project-local `jinx.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Pin one dotted key (`output.format`) above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<JinxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config.templates.root, PathBuf::from("."));
        assert!(config.resolver.detect_cycles);
        assert_eq!(config.output.format().unwrap(), OutputFormat::AstTreeviz);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("resolver.detect_cycles", false)
            .expect("override to apply")
            .set_override("output.format", "source")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!ResolveOptions::from(&config.resolver).detect_cycles);
        assert_eq!(config.output.format().unwrap(), OutputFormat::Source);
    }

    #[test]
    fn layers_files_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jinx.toml");
        fs::write(&path, "[templates]\nroot = \"site/templates\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.templates.root, PathBuf::from("site/templates"));
        assert_eq!(config.output.format, "ast-treeviz");
    }

    #[test]
    fn optional_file_may_be_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .unwrap();
        assert!(config.resolver.detect_cycles);

        let missing = Loader::new().with_file(dir.path().join("absent.toml")).build();
        assert!(missing.is_err());
    }

    #[test]
    fn unknown_format_is_reported() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .unwrap()
            .build()
            .unwrap();
        assert!(config.output.format().is_err());
    }
}
