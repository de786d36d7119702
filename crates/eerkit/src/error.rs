//! Error types for eerkit operations.
//!
//! This module provides the main error type [`EerError`] which wraps the
//! error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use eerkit_loader::error::LoadError;

use crate::{config::ConfigError, render::RenderError, validate::ValidationError};

/// The main error type for eerkit operations.
///
/// # Diagnostic Variants
///
/// The `Load` variant keeps the schema source next to the loader
/// diagnostics, so that their spans can be shown in context.
#[derive(Debug, Error)]
pub enum EerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{err}")]
    Load { err: LoadError, src: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl EerError {
    /// Create a new `Load` error with the associated source text.
    pub fn new_load_error(err: LoadError, src: impl Into<String>) -> Self {
        Self::Load {
            err,
            src: src.into(),
        }
    }
}
