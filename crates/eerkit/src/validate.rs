//! Consistency checks over a built [`Model`].
//!
//! A check is a [`Rule`]. [`validate`] runs every rule of a list in order,
//! whether or not earlier ones found problems, and collects what each one
//! reports into a [`ValidationReport`]. Problems in the schema are never
//! fatal; only a rule that fails to run aborts validation.
//!
//! # Example
//!
//! ```
//! use eerkit::model::{Attribute, Entity, Model};
//! use eerkit::validate::{RuleSet, validate};
//!
//! let mut model = Model::new("Shop", "", vec![]);
//! model.add_entity(Entity::regular("product"));
//! model.add_entity(Entity::regular("customer").with_attribute(Attribute::simple("id").as_key()));
//!
//! let report = validate(&model, &RuleSet::Basic.rules()).unwrap();
//! assert_eq!(report.failed(), 1);
//! assert_eq!(
//!     report.errors().next().unwrap().report_line(),
//!     "X -- Missing key attribute | Item: PRODUCT | Info: -"
//! );
//! ```

mod report;
mod rules;

pub use report::{RuleOutcome, ValidationReport};
pub use rules::{
    EntityKeyRule, KeyAttributeKindRule, RelationshipDegreeRule, SpecializationMembersRule,
    WeakEntityIdentificationRule,
};

use std::{error::Error as StdError, fmt, str::FromStr};

use log::{debug, error, info};
use serde::Deserialize;
use thiserror::Error;

use eerkit_core::model::Model;

/// An internal failure of a rule, as opposed to a problem it found.
pub type RuleFault = Box<dyn StdError + Send + Sync>;

/// A problem found in a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelError {
    item: String,
    reason: String,
    info: Option<String>,
}

impl ModelError {
    /// Creates an error about the item named `item`.
    pub fn new(item: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            reason: reason.into(),
            info: None,
        }
    }

    /// Attaches debug detail, such as the offending index or value.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Normalized name of the offending item.
    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Formats the error as a single report line.
    pub fn report_line(&self) -> String {
        format!(
            "X -- {} | Item: {} | Info: {}",
            self.reason,
            self.item,
            self.info.as_deref().unwrap_or("-")
        )
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report_line())
    }
}

/// A single consistency check.
pub trait Rule {
    /// Short stable identifier, e.g. `entity-key`.
    fn id(&self) -> &'static str;

    /// What the rule checks, phrased as a question.
    fn description(&self) -> &'static str;

    /// Checks `model`. The rule passes if the returned list is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleFault`] only if the rule itself is broken.
    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault>;
}

/// Validation could not be completed.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Rule '{rule}' failed to run: {source}")]
    RuleFault {
        rule: &'static str,
        #[source]
        source: RuleFault,
    },
}

/// A predefined list of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Entity keys, relationship degree and weak entity identification.
    #[default]
    Basic,
    /// The basic rules, plus specialization members and key attribute kinds.
    Strict,
}

impl RuleSet {
    /// Returns the rules of this set in execution order.
    pub fn rules(self) -> Vec<Box<dyn Rule>> {
        let mut rules: Vec<Box<dyn Rule>> = vec![
            Box::new(EntityKeyRule),
            Box::new(RelationshipDegreeRule),
            Box::new(WeakEntityIdentificationRule),
        ];
        if self == RuleSet::Strict {
            rules.push(Box::new(SpecializationMembersRule));
            rules.push(Box::new(KeyAttributeKindRule));
        }
        rules
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(RuleSet::Basic),
            "strict" => Ok(RuleSet::Strict),
            _ => Err(format!(
                "Unknown mode: {}. Valid options: basic, strict",
                s
            )),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSet::Basic => write!(f, "basic"),
            RuleSet::Strict => write!(f, "strict"),
        }
    }
}

/// Runs `rules` over `model` in order.
///
/// # Errors
///
/// Returns [`ValidationError::RuleFault`] naming the rule that was running
/// if a rule faults. Rules after it are not run.
pub fn validate(
    model: &Model,
    rules: &[Box<dyn Rule>],
) -> Result<ValidationReport, ValidationError> {
    info!(model = model.name(), rules = rules.len(); "Validating schema");

    let mut report = ValidationReport::default();
    for rule in rules {
        debug!(rule = rule.id(); "Checking rule");
        let errors = rule.run(model).map_err(|source| {
            error!(rule = rule.id(), err:? = source; "Rule failed to run");
            ValidationError::RuleFault {
                rule: rule.id(),
                source,
            }
        })?;

        debug!(rule = rule.id(), errors = errors.len(); "Rule checked");
        report.push(RuleOutcome::new(rule.id(), rule.description(), errors));
    }

    info!(
        passed = report.passed(),
        failed = report.failed(),
        total = report.total();
        "Validation finished",
    );
    Ok(report)
}
