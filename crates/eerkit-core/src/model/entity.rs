//! Entity types.

use std::fmt;

use log::debug;

use super::{Attribute, Specialization};
use crate::normalize::normalize_entity_name;

/// The variant of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityKind {
    /// An entity identified by its own primary key.
    #[default]
    Regular,
    /// An entity with only a partial key, identified through a relationship.
    Weak,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Regular => write!(f, "regular"),
            EntityKind::Weak => write!(f, "weak"),
        }
    }
}

/// An entity type with its attributes and the specializations it is the
/// superclass of.
///
/// The first attribute added with the key flag becomes the entity's key
/// (primary for regular entities, partial for weak ones). Later key-flagged
/// attributes are kept as ordinary attributes.
///
/// # Example
///
/// ```
/// use eerkit_core::model::{Attribute, Entity};
///
/// let student = Entity::regular("student")
///     .with_attribute(Attribute::simple("id").as_key())
///     .with_attribute(Attribute::simple("name"));
///
/// assert_eq!(student.name(), "STUDENT");
/// assert_eq!(student.key().map(Attribute::name), Some("Id"));
/// ```
#[derive(Debug, Clone)]
pub struct Entity {
    kind: EntityKind,
    name: String,
    key: Option<usize>,
    attributes: Vec<Attribute>,
    specializations: Vec<Specialization>,
}

impl Entity {
    /// Creates an entity. The name is normalized.
    pub fn new(kind: EntityKind, name: &str) -> Self {
        Self {
            kind,
            name: normalize_entity_name(name),
            key: None,
            attributes: Vec::new(),
            specializations: Vec::new(),
        }
    }

    pub fn regular(name: &str) -> Self {
        Self::new(EntityKind::Regular, name)
    }

    pub fn weak(name: &str) -> Self {
        Self::new(EntityKind::Weak, name)
    }

    /// Adds an attribute.
    ///
    /// Specializations are attached through
    /// [`Model::specialize`](super::Model::specialize), which checks their
    /// handles.
    pub fn add(&mut self, attribute: Attribute) -> &mut Self {
        if attribute.is_key() {
            if self.key.is_none() {
                self.key = Some(self.attributes.len());
            } else {
                debug!(
                    entity = self.name,
                    attribute = attribute.name();
                    "Entity already has a key, keeping attribute as non-key"
                );
            }
        }
        self.attributes.push(attribute);
        self
    }

    pub(super) fn attach(&mut self, specialization: Specialization) {
        self.specializations.push(specialization);
    }

    /// Adds an attribute and returns the entity, for chained construction.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.add(attribute);
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_weak(&self) -> bool {
        self.kind == EntityKind::Weak
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key attribute, if one was assigned.
    pub fn key(&self) -> Option<&Attribute> {
        self.key.map(|idx| &self.attributes[idx])
    }

    /// Returns all attributes in declaration order, the key included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the specializations this entity is the superclass of.
    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }
}
