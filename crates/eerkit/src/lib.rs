//! eerkit - A toolkit for Extended Entity-Relationship schemas.
//!
//! Loads a schema description, checks it against modelling rules and draws
//! it as a Graphviz diagram. Each stage can also be used on its own with a
//! [`Model`](model::Model) built in code.

pub mod config;
pub mod emit;
pub mod render;
pub mod validate;

mod error;

pub use eerkit_core::{ConstructionError, model, normalize};
pub use eerkit_loader as loader;

pub use error::EerError;

use log::{debug, info, trace};

use config::AppConfig;
use model::Model;
use validate::{RuleSet, ValidationReport};

/// Processor for loading, validating and drawing schemas.
///
/// # Examples
///
/// ```rust,no_run
/// use eerkit::{SchemaProcessor, config::AppConfig, validate::RuleSet};
///
/// let source = r#"
///     name = "Shop"
///
///     [[entity]]
///     name = "Product"
///     attributes = [{ name = "Sku", key = true }]
/// "#;
///
/// let processor = SchemaProcessor::new(AppConfig::default());
///
/// let model = processor.load(source).expect("Failed to load");
/// let report = processor.validate(&model, RuleSet::Basic).expect("Rules run");
/// println!("{report}");
///
/// let dot = processor.emit(&model);
/// let png = processor.render(&dot).expect("Failed to render");
/// ```
#[derive(Default)]
pub struct SchemaProcessor {
    config: AppConfig,
}

impl SchemaProcessor {
    /// Create a new processor with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load a schema description into a model.
    ///
    /// # Errors
    ///
    /// Returns [`EerError::Load`], carrying `source`, if the description is
    /// malformed or cannot be built into a model.
    pub fn load(&self, source: &str) -> Result<Model, EerError> {
        info!("Loading schema");

        let model = eerkit_loader::load(source)
            .map_err(|err| EerError::new_load_error(err, source))?;

        debug!("Schema loaded successfully");
        trace!(model:?; "Loaded model");

        Ok(model)
    }

    /// Check `model` against the rules of `rule_set`.
    ///
    /// Problems in the model are part of the report, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`EerError::Validation`] if a rule fails to run.
    pub fn validate(
        &self,
        model: &Model,
        rule_set: RuleSet,
    ) -> Result<ValidationReport, EerError> {
        debug!(rule_set:?; "Running rule set");
        Ok(validate::validate(model, &rule_set.rules())?)
    }

    /// Emit `model` as Graphviz DOT text using the configured style.
    pub fn emit(&self, model: &Model) -> String {
        info!(model = model.name(); "Emitting diagram");
        emit::emit(model, self.config.style())
    }

    /// Render DOT text with the configured engine and format.
    ///
    /// # Errors
    ///
    /// Returns [`EerError::Render`] if Graphviz fails or is unavailable.
    pub fn render(&self, dot: &str) -> Result<Vec<u8>, EerError> {
        let render = self.config.render();
        Ok(render::render(dot, render.engine(), render.format())?)
    }
}
