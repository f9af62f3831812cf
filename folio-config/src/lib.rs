//! Shared configuration loader for the folio toolchain.
//!
//! `defaults/folio.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FolioConfig`].
//! The sections map onto the conversion options of `folio-model`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use folio_model::{DomToModelOptions, FormatMap, ModelToDomOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Top-level configuration consumed by folio applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub dom_to_model: DomToModelConfig,
    pub model_to_dom: ModelToDomConfig,
    pub normalize: NormalizeConfig,
}

/// Markup → model conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct DomToModelConfig {
    pub allow_cache_element: bool,
    #[serde(default)]
    pub default_format: DefaultFormatConfig,
}

/// The segment format every converted segment starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DefaultFormatConfig {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}

impl From<&DefaultFormatConfig> for FormatMap {
    fn from(config: &DefaultFormatConfig) -> Self {
        let keys = [
            ("fontFamily", &config.font_family),
            ("fontSize", &config.font_size),
            ("textColor", &config.text_color),
            ("backgroundColor", &config.background_color),
        ];
        let mut format = FormatMap::new();
        for (key, value) in keys {
            if let Some(value) = value {
                format.set(key, value.as_str());
            }
        }
        format
    }
}

/// Model → markup conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelToDomConfig {
    pub reuse_cached_elements: bool,
    pub merge_adjacent_text: bool,
}

impl From<&ModelToDomConfig> for ModelToDomOptions {
    fn from(config: &ModelToDomConfig) -> Self {
        ModelToDomOptions {
            reuse_cached_elements: config.reuse_cached_elements,
            merge_adjacent_text: config.merge_adjacent_text,
            ..ModelToDomOptions::default()
        }
    }
}

impl From<ModelToDomConfig> for ModelToDomOptions {
    fn from(config: ModelToDomConfig) -> Self {
        (&config).into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub enabled: bool,
}

/// Reading depends on two sections: the reader's own and whether to normalize its output.
impl From<&FolioConfig> for DomToModelOptions {
    fn from(config: &FolioConfig) -> Self {
        DomToModelOptions {
            allow_cache_element: config.dom_to_model.allow_cache_element,
            default_format: (&config.dom_to_model.default_format).into(),
            normalize: config.normalize.enabled,
            ..DomToModelOptions::default()
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
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}
