//! # eerkit Loader
//!
//! Builds an [`eerkit_core::model::Model`] from a schema description written
//! in TOML.
//!
//! ## Usage
//!
//! ```
//! # use eerkit_loader::{load, error::LoadError};
//!
//! fn main() -> Result<(), LoadError> {
//!     let source = r#"
//!         name = "University"
//!
//!         [[entity]]
//!         name = "Student"
//!         attributes = [{ name = "Id", key = true }]
//!     "#;
//!
//!     let model = load(source)?;
//!     assert_eq!(model.entity_count(), 1);
//!     Ok(())
//! }
//! ```

mod document;
mod elaborate;
pub mod error;
mod span;

pub use span::Span;

use std::path::{Path, PathBuf};

use log::info;

use eerkit_core::model::Model;

use document::Document;
use elaborate::Builder;
use error::{Diagnostic, LoadError};

/// File extension of schema descriptions.
pub const EXTENSION: &str = "dbcs";

/// Load a schema description into a model.
///
/// The pipeline has two steps:
///
/// 1. **Parse** - Deserialize the TOML document
/// 2. **Elaborate** - Resolve entity references and build the model
///
/// # Errors
///
/// Returns a [`LoadError`] with every problem found. A document that is not
/// valid TOML or does not match the schema layout stops at the first step
/// with a single `E001` diagnostic.
pub fn load(source: &str) -> Result<Model, LoadError> {
    let document: Document = toml::from_str(source).map_err(Diagnostic::from)?;

    let model = Builder::new().build(document)?;
    info!(
        model = model.name(),
        entities = model.entity_count(),
        relationships = model.relationship_count();
        "Schema loaded",
    );
    Ok(model)
}

/// Replace the extension of `path` with `extension`, adding one if missing.
///
/// ```
/// # use std::path::Path;
/// # use eerkit_loader::change_extension;
/// assert_eq!(change_extension("university", "dbcs"), Path::new("university.dbcs"));
/// assert_eq!(change_extension("notes.txt", "dbcs"), Path::new("notes.dbcs"));
/// ```
pub fn change_extension(path: impl AsRef<Path>, extension: &str) -> PathBuf {
    path.as_ref().with_extension(extension)
}
