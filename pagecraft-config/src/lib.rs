//! Shared configuration loader for the pagecraft toolchain.
//!
//! `defaults/pagecraft.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PagecraftConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pagecraft_babel::builder::BuildOptions;
use pagecraft_babel::formats::treeviz::TreevizOptions;
use pagecraft_babel::render::RenderOptions;
use serde::Deserialize;
use std::path::Path;
use url::Url;

const DEFAULT_TOML: &str = include_str!("../defaults/pagecraft.default.toml");

/// Top-level configuration consumed by pagecraft applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PagecraftConfig {
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub inspect: InspectConfig,
}

/// HTML import knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub max_depth: usize,
    pub id_prefix: String,
    pub preserve_embeds: bool,
    #[serde(default)]
    pub asset_base_url: Option<String>,
}

impl TryFrom<&ImportConfig> for BuildOptions {
    type Error = url::ParseError;

    fn try_from(config: &ImportConfig) -> Result<Self, Self::Error> {
        let asset_base_url = match config.asset_base_url.as_deref() {
            Some(base) if !base.trim().is_empty() => Some(Url::parse(base)?),
            _ => None,
        };
        Ok(BuildOptions {
            max_depth: config.max_depth,
            id_prefix: config.id_prefix.clone(),
            preserve_embeds: config.preserve_embeds,
            asset_base_url,
        })
    }
}

/// HTML export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub include_baseline_css: bool,
    pub max_depth: usize,
    pub title: String,
    pub lang: String,
}

impl From<ExportConfig> for RenderOptions {
    fn from(config: ExportConfig) -> Self {
        RenderOptions {
            include_baseline_css: config.include_baseline_css,
            max_depth: config.max_depth,
            title: config.title,
            lang: config.lang,
        }
    }
}

impl From<&ExportConfig> for RenderOptions {
    fn from(config: &ExportConfig) -> Self {
        RenderOptions {
            include_baseline_css: config.include_baseline_css,
            max_depth: config.max_depth,
            title: config.title.clone(),
            lang: config.lang.clone(),
        }
    }
}

/// Controls treeviz inspect output.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InspectConfig {
    pub show_props: bool,
    pub show_style: bool,
}

impl From<&InspectConfig> for TreevizOptions {
    fn from(config: &InspectConfig) -> Self {
        TreevizOptions {
            show_props: config.show_props,
            show_style: config.show_style,
        }
    }
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PagecraftConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PagecraftConfig, ConfigError> {
    Loader::new().build()
}
