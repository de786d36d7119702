//! Relationships and the links connecting them to entities.

use std::fmt;

use super::{Attribute, EntityId, StructuralConstraint};
use crate::normalize::normalize_entity_name;

/// The variant of a [`Relationship`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationshipKind {
    #[default]
    Regular,
    /// Supplies the missing part of a weak entity's key.
    Identifying,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Regular => write!(f, "regular"),
            RelationshipKind::Identifying => write!(f, "identifying"),
        }
    }
}

/// The participation of an entity in a relationship.
///
/// Both the participant and the structural constraint may be absent; such a
/// link is accepted at construction and reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    role: String,
    entity: Option<EntityId>,
    constraint: Option<StructuralConstraint>,
}

impl Link {
    /// Creates a link from `entity` bounded by `constraint`.
    pub fn new(entity: EntityId, constraint: StructuralConstraint) -> Self {
        Self {
            role: String::new(),
            entity: Some(entity),
            constraint: Some(constraint),
        }
    }

    /// Creates a link whose participant or constraint may be missing.
    pub fn from_parts(entity: Option<EntityId>, constraint: Option<StructuralConstraint>) -> Self {
        Self {
            role: String::new(),
            entity,
            constraint,
        }
    }

    /// Sets the role name. Roles are lower-cased.
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = role.to_lowercase();
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    pub fn constraint(&self) -> Option<&StructuralConstraint> {
        self.constraint.as_ref()
    }
}

/// A relationship type between entities.
///
/// # Example
///
/// ```
/// use eerkit_core::model::{
///     Attribute, Entity, Link, Model, Relationship, StructuralConstraint,
/// };
///
/// let mut model = Model::new("University", "", vec![]);
/// let student = model.add_entity(Entity::regular("student"));
/// let course = model.add_entity(Entity::regular("course"));
///
/// let enrolls = Relationship::regular("enrolls")
///     .with_link(Link::new(student, StructuralConstraint::partial_many()))
///     .with_link(Link::new(course, StructuralConstraint::partial_many()))
///     .with_attribute(Attribute::simple("grade"));
///
/// assert_eq!(enrolls.name(), "ENROLLS");
/// assert_eq!(enrolls.links().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    kind: RelationshipKind,
    name: String,
    links: Vec<Link>,
    attributes: Vec<Attribute>,
}

impl Relationship {
    /// Creates a relationship without links. The name is normalized.
    pub fn new(kind: RelationshipKind, name: &str) -> Self {
        Self {
            kind,
            name: normalize_entity_name(name),
            links: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn regular(name: &str) -> Self {
        Self::new(RelationshipKind::Regular, name)
    }

    pub fn identifying(name: &str) -> Self {
        Self::new(RelationshipKind::Identifying, name)
    }

    /// Appends a link and returns the relationship, for chained construction.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Appends an attribute and returns the relationship, for chained
    /// construction.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.add(attribute);
        self
    }

    /// Appends an attribute.
    pub fn add(&mut self, attribute: Attribute) -> &mut Self {
        self.attributes.push(attribute);
        self
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn is_identifying(&self) -> bool {
        self.kind == RelationshipKind::Identifying
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
