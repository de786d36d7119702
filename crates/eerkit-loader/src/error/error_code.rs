//! Error codes for loader diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors
//! - `E1xx` - Reference errors
//! - `E2xx` - Construction errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed schema document.
    ///
    /// The input is not valid TOML, or does not have the shape of a schema
    /// description (unknown key, wrong value type, unknown kind).
    E001,

    // =========================================================================
    // Reference Errors (E1xx)
    // =========================================================================
    /// Undefined entity reference.
    ///
    /// A link or specialization names an entity that is not declared.
    E100,

    /// Duplicate definition.
    ///
    /// Two entities or relationships normalize to the same name. Names key
    /// the diagram's nodes, so they must be unique across both.
    E101,

    // =========================================================================
    // Construction Errors (E2xx)
    // =========================================================================
    /// Specialization without a parent.
    ///
    /// The superclass of a specialization could not be resolved.
    E200,

    /// Identifying relationship without a weak entity to identify.
    ///
    /// None of the participants is a weak entity that still lacks an
    /// identifying relationship.
    E201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed schema document",
            ErrorCode::E100 => "undefined entity",
            ErrorCode::E101 => "duplicate definition",
            ErrorCode::E200 => "specialization without parent",
            ErrorCode::E201 => "no weak entity to identify",
        }
    }
}

impl ErrorCode {
    /// Returns how to fix a problem with this code.
    pub fn help(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "see the eerkit-loader README for the document layout",
            ErrorCode::E100 => "declare it with an [[entity]] table",
            ErrorCode::E101 => "entities and relationships share one namespace",
            ErrorCode::E200 => "add a `parent` naming the superclass entity",
            ErrorCode::E201 => {
                "link a weak entity that no other identifying relationship identifies"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "undefined entity");
        assert_eq!(ErrorCode::E101.description(), "duplicate definition");
    }
}
