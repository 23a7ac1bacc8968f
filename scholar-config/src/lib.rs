//! Shared configuration loader for ScholarSync.
//!
//! `defaults/scholar.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ScholarConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use scholar_babel::{DocxOptions, ReportOptions};
use scholar_genai::{ClientSettings, Precision};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/scholar.default.toml");

/// Project-local file picked up when present.
pub const LOCAL_CONFIG_FILE: &str = "scholar.toml";

/// Top-level configuration consumed by ScholarSync applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ScholarConfig {
    pub report: ReportConfig,
    pub docx: DocxConfig,
    pub genai: GenAiConfig,
}

/// Report wording and naming.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub prefix: String,
    pub title: String,
    pub subtitle: String,
    pub default_topic: String,
    pub confidential_label: String,
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        ReportOptions {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            default_topic: config.default_topic.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    pub margin_twips: u32,
    pub body_font: String,
    pub code_font: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenAiConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub precision: Precision,
}

impl From<&GenAiConfig> for ClientSettings {
    fn from(config: &GenAiConfig) -> Self {
        ClientSettings {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl ScholarConfig {
    /// Package options; the header reads from `[report]`, the layout from `[docx]`.
    pub fn docx_options(&self) -> DocxOptions {
        DocxOptions {
            prefix: self.report.prefix.clone(),
            confidential_label: self.report.confidential_label.clone(),
            margin_twips: self.docx.margin_twips,
            body_font: self.docx.body_font.clone(),
            code_font: self.docx.code_font.clone(),
            generated_on: None,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        (&self.report).into()
    }

    pub fn client_settings(&self) -> ClientSettings {
        (&self.genai).into()
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
    pub fn build(self) -> Result<ScholarConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ScholarConfig, ConfigError> {
    Loader::new().build()
}
