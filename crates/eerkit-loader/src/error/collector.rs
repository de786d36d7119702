//! Collector for accumulating diagnostics while a model is built.
//!
//! Reference and construction problems are independent of each other, so the
//! loader reports all of them at once instead of stopping at the first.

use log::warn;

use crate::error::{Diagnostic, LoadError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns `Err(LoadError)` with every diagnostic if any was an error.
    /// Warnings alone do not fail the load and are only logged.
    pub fn finish(self) -> Result<(), LoadError> {
        if self.has_errors {
            return Err(LoadError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic = diagnostic.to_string(); "Schema warning");
        }
        Ok(())
    }
}
