//! Errors raised while a [`Model`](crate::model::Model) is being built.
//!
//! Construction is deliberately permissive. Only the two invariants that the
//! model cannot represent without are enforced here; every other modelling
//! rule is left to the validator.

use thiserror::Error;

use crate::model::EntityId;

/// A failure while building a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// A specialization was created without a superclass entity.
    #[error("No parent entity for specialization")]
    MissingParent,

    /// An entity handle was not issued by the model it was used with.
    #[error("Entity {0} does not belong to this model")]
    UnknownEntity(EntityId),

    /// An identifying relationship has no weak participant left to identify.
    #[error("No unidentified weak entity is identified by identifying relationship '{relationship}'")]
    UnidentifiedWeakEntity { relationship: String },
}
