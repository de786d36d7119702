//! Configuration types for schema processing.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file. Every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Which Graphviz [`LayoutEngine`] and [`OutputFormat`] to use.
//! - [`StyleConfig`] - Fill colours and spacing of the emitted diagram.
//! - [`ConfigError`] - A configuration file that is missing, unreadable or
//!   invalid.
//!
//! # Example
//!
//! ```
//! # use eerkit::config::AppConfig;
//! # use eerkit::render::{LayoutEngine, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.render().engine(), LayoutEngine::Neato);
//! assert_eq!(config.render().format(), OutputFormat::Png);
//! assert_eq!(config.style().entity_fill(), "lightblue2");
//! ```

use std::{
    io,
    ops::Range,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::render::{LayoutEngine, OutputFormat};

/// A configuration file that could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not TOML, or has an unknown key or a bad value.
    ///
    /// Keeps the file contents so that `span` can be shown in context.
    #[error("Invalid configuration file {}: {message}", path.display())]
    Invalid {
        path: PathBuf,
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Parses the contents of the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `src` is not a valid
    /// configuration.
    pub fn from_toml(path: &Path, src: String) -> Result<Self, ConfigError> {
        toml::from_str(&src).map_err(|err| ConfigError::Invalid {
            path: path.to_path_buf(),
            message: err.message().trim().to_string(),
            span: err.span(),
            src,
        })
    }

    /// Returns the render configuration for modification.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }
}

/// Settings passed to Graphviz.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    engine: LayoutEngine,

    #[serde(default)]
    format: OutputFormat,
}

impl RenderConfig {
    pub fn new(engine: LayoutEngine, format: OutputFormat) -> Self {
        Self { engine, format }
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_engine(&mut self, engine: LayoutEngine) {
        self.engine = engine;
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }
}

/// Appearance of the emitted diagram.
///
/// Colours are Graphviz colour names or `#rrggbb` strings and are written to
/// the DOT output as given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    entity_fill: String,
    attribute_fill: String,
    relationship_fill: String,
    specialization_fill: String,
    /// Graphviz `overlap` directive.
    overlap: String,
}

impl StyleConfig {
    pub fn entity_fill(&self) -> &str {
        &self.entity_fill
    }

    pub fn attribute_fill(&self) -> &str {
        &self.attribute_fill
    }

    pub fn relationship_fill(&self) -> &str {
        &self.relationship_fill
    }

    pub fn specialization_fill(&self) -> &str {
        &self.specialization_fill
    }

    pub fn overlap(&self) -> &str {
        &self.overlap
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            entity_fill: "lightblue2".to_string(),
            attribute_fill: "lightcyan1".to_string(),
            relationship_fill: "lavenderblush2".to_string(),
            specialization_fill: "grey97".to_string(),
            overlap: "scalexy".to_string(),
        }
    }
}
