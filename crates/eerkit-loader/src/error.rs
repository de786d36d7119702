//! Error and diagnostic system for the schema loader.
//!
//! Every problem found while loading is a [`Diagnostic`]: a message with an
//! optional [`ErrorCode`], labelled source locations and help text. All the
//! diagnostics of a failed load are wrapped in a [`LoadError`]. Reference
//! problems are independent, so they are gathered and reported together.

mod collector;
mod diagnostic;
mod error_code;
mod load_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use load_error::LoadError;
