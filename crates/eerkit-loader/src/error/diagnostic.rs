//! Loader diagnostics.
//!
//! A [`Diagnostic`] is built from the problem it describes. The error code
//! decides the help text and the wording of the primary label, so every
//! problem of one kind reads the same wherever it is found.

use std::fmt;

use eerkit_core::ConstructionError;

use crate::{error::ErrorCode, span::Span};

/// Whether a diagnostic stops the schema from loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A marked region of the schema source.
///
/// The primary label points at the problem itself; secondary labels point at
/// related declarations.
#[derive(Debug, Clone, Copy)]
pub struct Label {
    span: Span,
    message: &'static str,
    primary: bool,
}

impl Label {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// A problem found while loading a schema description.
///
/// ```text
/// error[E100]: entity `TEACHER` is not declared
///   --> university.dbcs:14:16
///    |
/// 14 |   { entity = "Teacher", constraint = [1, 1] },
///    |              ^^^^^^^^^ undefined entity
///    |
///    = help: declare it with an [[entity]] table
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<&'static str>,
}

impl Diagnostic {
    /// A link or specialization names an entity that was never declared.
    ///
    /// ```
    /// # use eerkit_loader::{Span, error::{Diagnostic, ErrorCode}};
    /// let diag = Diagnostic::undeclared_entity("TEACHER", Span::new(42..51));
    ///
    /// assert_eq!(diag.code(), Some(ErrorCode::E100));
    /// assert_eq!(diag.to_string(), "error[E100]: entity `TEACHER` is not declared");
    /// ```
    pub fn undeclared_entity(name: &str, span: Span) -> Self {
        Self::coded(ErrorCode::E100, format!("entity `{name}` is not declared"), Some(span))
    }

    /// Two entities or relationships share a normalized name.
    pub fn duplicate_name(name: &str, span: Span, first: Span) -> Self {
        let mut diag = Self::coded(
            ErrorCode::E101,
            format!("`{name}` is defined multiple times"),
            Some(span),
        );
        diag.labels.push(Label {
            span: first,
            message: "first defined here",
            primary: false,
        });
        diag
    }

    /// The model refused a specialization or relationship.
    pub fn construction(err: &ConstructionError, span: Option<Span>) -> Self {
        let code = match err {
            ConstructionError::MissingParent => ErrorCode::E200,
            ConstructionError::UnidentifiedWeakEntity { .. } => ErrorCode::E201,
            ConstructionError::UnknownEntity(_) => ErrorCode::E100,
        };
        Self::coded(code, err.to_string(), span)
    }

    /// A name keeps no characters once normalized.
    pub fn empty_name(span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: "name has no letters or digits".to_string(),
            labels: vec![Label {
                span,
                message: "normalizes to an empty name",
                primary: true,
            }],
            help: Some("the diagram node for it will have an empty label"),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in display order, the primary one first.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help
    }

    fn coded(code: ErrorCode, message: String, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Error,
            code: Some(code),
            message,
            labels: span
                .map(|span| Label {
                    span,
                    message: code.description(),
                    primary: true,
                })
                .into_iter()
                .collect(),
            help: Some(code.help()),
        }
    }
}

/// A document that is not TOML, or not shaped like a schema description.
impl From<toml::de::Error> for Diagnostic {
    fn from(err: toml::de::Error) -> Self {
        Self::coded(
            ErrorCode::E001,
            err.message().trim().to_string(),
            err.span().map(Span::from),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_duplicate_points_at_both_definitions() {
        let diag = Diagnostic::duplicate_name("STUDENT", Span::new(100..107), Span::new(10..17));

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        let labels = diag.labels();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].is_primary());
        assert_eq!(labels[0].span().start(), 100);
        assert!(!labels[1].is_primary());
        assert_eq!(labels[1].message(), "first defined here");
        assert_eq!(diag.help(), Some(ErrorCode::E101.help()));
    }

    #[test]
    fn test_construction_codes() {
        let cases = [
            (ConstructionError::MissingParent, ErrorCode::E200),
            (
                ConstructionError::UnidentifiedWeakEntity {
                    relationship: "HAS".to_string(),
                },
                ErrorCode::E201,
            ),
        ];

        for (err, code) in cases {
            let diag = Diagnostic::construction(&err, None);
            assert_eq!(diag.code(), Some(code));
            assert_eq!(diag.message(), err.to_string());
            assert!(diag.labels().is_empty());
        }
    }

    #[test]
    fn test_malformed_document() {
        let err = toml::from_str::<Document>("name = \"M\"\nnonsense = 1\n").unwrap_err();
        let diag = Diagnostic::from(err);

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert!(diag.message().contains("nonsense"), "{}", diag.message());
        assert_eq!(diag.labels()[0].message(), "malformed schema document");
    }

    #[test]
    fn test_empty_name_is_a_warning() {
        let diag = Diagnostic::empty_name(Span::new(0..4));

        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(diag.to_string(), "warning: name has no letters or digits");
    }
}
