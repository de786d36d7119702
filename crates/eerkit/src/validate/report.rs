use std::fmt;

use super::ModelError;

/// The result of running one rule.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    id: &'static str,
    description: &'static str,
    errors: Vec<ModelError>,
}

impl RuleOutcome {
    pub fn new(id: &'static str, description: &'static str, errors: Vec<ModelError>) -> Self {
        Self {
            id,
            description,
            errors,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn errors(&self) -> &[ModelError] {
        &self.errors
    }

    /// A rule passes when it found nothing.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcomes of a validation run, in rule execution order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    outcomes: Vec<RuleOutcome>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, outcome: RuleOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Number of rules that found nothing.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of rules that found at least one problem.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// All errors, grouped by rule in execution order.
    pub fn errors(&self) -> impl Iterator<Item = &ModelError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let status = if outcome.passed() { "PASS" } else { "FAIL" };
            writeln!(f, "[{status}] {}: {}", outcome.id, outcome.description)?;
            for error in &outcome.errors {
                writeln!(f, "    {error}")?;
            }
        }
        write!(
            f,
            "{} passed, {} failed, {} total",
            self.passed(),
            self.failed(),
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ValidationReport {
        let mut report = ValidationReport::default();
        report.push(RuleOutcome::new("first", "Is it first", Vec::new()));
        report.push(RuleOutcome::new(
            "second",
            "Is it second",
            vec![
                ModelError::new("A", "Broken"),
                ModelError::new("B", "Also broken").with_info("i=0"),
            ],
        ));
        report
    }

    #[test]
    fn test_counts() {
        let report = report();
        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_display() {
        let expected = "\
[PASS] first: Is it first
[FAIL] second: Is it second
    X -- Broken | Item: A | Info: -
    X -- Also broken | Item: B | Info: i=0
1 passed, 1 failed, 2 total";
        assert_eq!(report().to_string(), expected);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = ValidationReport::default();
        assert!(report.is_success());
        assert_eq!(report.to_string(), "0 passed, 0 failed, 0 total");
    }
}
