//! The Extended Entity-Relationship model.
//!
//! A [`Model`] owns every [`Entity`] and [`Relationship`] of a schema.
//! Everything else refers to entities through [`EntityId`] handles issued by
//! the model: links name their participant, specializations name their parent
//! and subclasses. The weak entity to identifying relationship association is
//! a lookup table kept by the model.
//!
//! Construction is permissive: a model missing keys, with unary
//! relationships or with malformed structural constraints can still be built,
//! inspected, validated and drawn.
//!
//! # Example
//!
//! ```
//! use eerkit_core::model::{
//!     Attribute, Entity, Link, Model, Relationship, StructuralConstraint,
//! };
//!
//! let mut model = Model::new("Company", "Employees and dependents", vec!["Ada".into()]);
//!
//! let employee = model.add_entity(
//!     Entity::regular("employee").with_attribute(Attribute::simple("ssn").as_key()),
//! );
//! let dependent = model.add_entity(
//!     Entity::weak("dependent").with_attribute(Attribute::simple("name").as_key()),
//! );
//!
//! let supports = model
//!     .add_relationship(
//!         Relationship::identifying("supports")
//!             .with_link(Link::new(employee, StructuralConstraint::partial_many()))
//!             .with_link(Link::new(dependent, StructuralConstraint::total_single())),
//!     )
//!     .expect("dependent is unidentified");
//!
//! assert_eq!(model.identifying_relationship(dependent), Some(supports));
//! ```

mod attribute;
mod constraint;
mod entity;
mod relationship;
mod specialization;

pub use attribute::{Attribute, AttributeKind};
pub use constraint::{Bound, Cardinality, ConstraintDefect, MANY, StructuralConstraint};
pub use entity::{Entity, EntityKind};
pub use relationship::{Link, Relationship, RelationshipKind};
pub use specialization::{Specialization, SpecializationKind};

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::{ConstructionError, normalize::normalize_entity_name};

/// Handle of an [`Entity`] within a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the entity in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a [`Relationship`] within a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipId(usize);

impl RelationshipId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the relationship in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that can be added to a [`Model`].
#[derive(Debug, Clone)]
pub enum ModelMember {
    Entity(Entity),
    Relationship(Relationship),
}

impl From<Entity> for ModelMember {
    fn from(entity: Entity) -> Self {
        ModelMember::Entity(entity)
    }
}

impl From<Relationship> for ModelMember {
    fn from(relationship: Relationship) -> Self {
        ModelMember::Relationship(relationship)
    }
}

/// The root container of a schema.
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    description: String,
    authors: Vec<String>,
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
    identifying: IndexMap<EntityId, RelationshipId>,
}

impl Model {
    /// Creates an empty model with its metadata.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        authors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            authors,
            ..Self::default()
        }
    }

    /// Adds an entity or a relationship.
    ///
    /// # Errors
    ///
    /// See [`Model::add_relationship`].
    pub fn add(
        &mut self,
        member: impl Into<ModelMember>,
    ) -> Result<&mut Self, ConstructionError> {
        match member.into() {
            ModelMember::Entity(entity) => {
                self.add_entity(entity);
            }
            ModelMember::Relationship(relationship) => {
                self.add_relationship(relationship)?;
            }
        }
        Ok(self)
    }

    /// Adds an entity and returns its handle.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new(self.entities.len());
        debug!(entity = entity.name(), kind:? = entity.kind(); "Adding entity");
        self.entities.push(entity);
        id
    }

    /// Adds a relationship and returns its handle.
    ///
    /// An identifying relationship claims the first weak participant that is
    /// not identified yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::UnidentifiedWeakEntity`] if an
    /// identifying relationship has no such participant.
    pub fn add_relationship(
        &mut self,
        relationship: Relationship,
    ) -> Result<RelationshipId, ConstructionError> {
        let id = RelationshipId::new(self.relationships.len());

        if relationship.is_identifying() {
            let weak = relationship
                .links()
                .iter()
                .filter_map(|link| link.entity())
                .find(|&entity| {
                    self.entity(entity).is_some_and(Entity::is_weak)
                        && !self.identifying.contains_key(&entity)
                })
                .ok_or_else(|| ConstructionError::UnidentifiedWeakEntity {
                    relationship: relationship.name().to_string(),
                })?;

            debug!(
                relationship = relationship.name(),
                entity = self.entities[weak.index()].name();
                "Identifying weak entity"
            );
            self.identifying.insert(weak, id);
        }

        debug!(
            relationship = relationship.name(),
            kind:? = relationship.kind();
            "Adding relationship"
        );
        self.relationships.push(relationship);
        Ok(id)
    }

    /// Attaches a specialization to its parent entity.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::UnknownEntity`] if the parent or any
    /// subclass handle does not belong to this model. Nothing is attached in
    /// that case.
    pub fn specialize(
        &mut self,
        specialization: Specialization,
    ) -> Result<&mut Self, ConstructionError> {
        if let Some(&unknown) = specialization
            .derived()
            .iter()
            .find(|&&derived| self.entity(derived).is_none())
        {
            return Err(ConstructionError::UnknownEntity(unknown));
        }

        let parent = specialization.parent();
        let entity = self
            .entities
            .get_mut(parent.index())
            .ok_or(ConstructionError::UnknownEntity(parent))?;
        debug!(
            parent = entity.name(),
            subclasses = specialization.derived().len();
            "Attaching specialization"
        );
        entity.attach(specialization);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Returns the entity behind a handle.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// Returns the relationship behind a handle.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.get(id.index())
    }

    /// Iterates over entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(idx, entity)| (EntityId::new(idx), entity))
    }

    /// Iterates over relationships in declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = (RelationshipId, &Relationship)> {
        self.relationships
            .iter()
            .enumerate()
            .map(|(idx, relationship)| (RelationshipId::new(idx), relationship))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Looks up an entity by name. The name is normalized first.
    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        let name = normalize_entity_name(name);
        self.entities
            .iter()
            .position(|entity| entity.name() == name)
            .map(EntityId::new)
    }

    /// Returns the identifying relationship of a weak entity, if assigned.
    pub fn identifying_relationship(&self, entity: EntityId) -> Option<RelationshipId> {
        self.identifying.get(&entity).copied()
    }

    /// Returns the direct superclasses of an entity.
    pub fn superclasses(&self, entity: EntityId) -> Vec<EntityId> {
        self.entities()
            .filter(|(_, candidate)| {
                candidate
                    .specializations()
                    .iter()
                    .any(|spec| spec.derived().contains(&entity))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the relationships an entity participates in, once each.
    pub fn relationships_of(&self, entity: EntityId) -> Vec<RelationshipId> {
        self.relationships()
            .filter(|(_, relationship)| {
                relationship
                    .links()
                    .iter()
                    .any(|link| link.entity() == Some(entity))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Formats the author list for a caption.
    ///
    /// One name is returned as is, two are joined with `" and "`, and three
    /// or more are comma separated with `"and "` before the last name.
    pub fn authors_string(&self) -> String {
        match self.authors.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{first} and {second}"),
            [init @ .., last] => format!("{}, and {last}", init.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_authors_string() {
        let cases = [
            (authors(&[]), ""),
            (authors(&["Ada"]), "Ada"),
            (authors(&["Ada", "Grace"]), "Ada and Grace"),
            (authors(&["Ada", "Grace", "Edsger"]), "Ada, Grace, and Edsger"),
            (
                authors(&["Ada", "Grace", "Edsger", "Barbara"]),
                "Ada, Grace, Edsger, and Barbara",
            ),
        ];

        for (names, expected) in cases {
            let model = Model::new("M", "", names);
            assert_eq!(model.authors_string(), expected);
        }
    }

    #[test]
    fn test_add_dispatches_on_member() {
        let mut model = Model::new("M", "", Vec::new());
        let student = model.add_entity(Entity::regular("student"));

        model
            .add(Entity::regular("course"))
            .expect("entities always add")
            .add(
                Relationship::regular("enrolls")
                    .with_link(Link::new(student, StructuralConstraint::partial_many())),
            )
            .expect("regular relationships always add");

        assert_eq!(model.entity_count(), 2);
        assert_eq!(model.relationship_count(), 1);
    }

    #[test]
    fn test_entities_keep_declaration_order() {
        let mut model = Model::new("M", "", Vec::new());
        model.add_entity(Entity::regular("b"));
        model.add_entity(Entity::regular("a"));

        let names: Vec<_> = model.entities().map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_entity_lookup_normalizes() {
        let mut model = Model::new("M", "", Vec::new());
        let id = model.add_entity(Entity::regular("course offering"));

        assert_eq!(model.entity_id("Course Offering"), Some(id));
        assert_eq!(model.entity_id("COURSE_OFFERING"), Some(id));
        assert_eq!(model.entity_id("course"), None);
    }

    #[test]
    fn test_identifying_relationship_claims_weak_entity() {
        let mut model = Model::new("M", "", Vec::new());
        let owner = model.add_entity(Entity::regular("employee"));
        let weak = model.add_entity(Entity::weak("dependent"));

        let rel = model
            .add_relationship(
                Relationship::identifying("supports")
                    .with_link(Link::new(owner, StructuralConstraint::partial_many()))
                    .with_link(Link::new(weak, StructuralConstraint::total_single())),
            )
            .expect("weak entity is unidentified");

        assert_eq!(model.identifying_relationship(weak), Some(rel));
        assert_eq!(model.identifying_relationship(owner), None);
    }

    #[test]
    fn test_identifying_relationship_skips_claimed_weak_entity() {
        let mut model = Model::new("M", "", Vec::new());
        let first = model.add_entity(Entity::weak("first"));
        let second = model.add_entity(Entity::weak("second"));

        let rel_a = model
            .add_relationship(
                Relationship::identifying("a")
                    .with_link(Link::new(first, StructuralConstraint::total_single()))
                    .with_link(Link::new(second, StructuralConstraint::total_single())),
            )
            .expect("first is unidentified");
        let rel_b = model
            .add_relationship(
                Relationship::identifying("b")
                    .with_link(Link::new(first, StructuralConstraint::total_single()))
                    .with_link(Link::new(second, StructuralConstraint::total_single())),
            )
            .expect("second is unidentified");

        assert_eq!(model.identifying_relationship(first), Some(rel_a));
        assert_eq!(model.identifying_relationship(second), Some(rel_b));
    }

    #[test]
    fn test_identifying_relationship_without_weak_entity_fails() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        let b = model.add_entity(Entity::regular("b"));

        let result = model.add_relationship(
            Relationship::identifying("owns")
                .with_link(Link::new(a, StructuralConstraint::partial_many()))
                .with_link(Link::new(b, StructuralConstraint::total_single())),
        );

        assert_eq!(
            result,
            Err(ConstructionError::UnidentifiedWeakEntity {
                relationship: "OWNS".to_string()
            })
        );
        assert_eq!(model.relationship_count(), 0);
    }

    #[test]
    fn test_specialize_attaches_to_parent() {
        let mut model = Model::new("M", "", Vec::new());
        let person = model.add_entity(Entity::regular("person"));
        let student = model.add_entity(Entity::regular("student"));

        model
            .specialize(Specialization::disjoint(person).with_entity(student))
            .expect("person exists");

        let parent = model.entity(person).expect("person exists");
        assert_eq!(parent.specializations().len(), 1);
        assert_eq!(model.superclasses(student), vec![person]);
        assert!(model.superclasses(person).is_empty());
    }

    #[test]
    fn test_specialize_unknown_parent_fails() {
        let mut model = Model::new("M", "", Vec::new());
        let result = model.specialize(Specialization::disjoint(EntityId::new(7)));

        assert!(matches!(
            result,
            Err(ConstructionError::UnknownEntity(id)) if id == EntityId::new(7)
        ));
    }

    #[test]
    fn test_specialize_unknown_subclass_fails() {
        let mut model = Model::new("M", "", Vec::new());
        let person = model.add_entity(Entity::regular("person"));
        let student = model.add_entity(Entity::regular("student"));

        let result = model.specialize(
            Specialization::disjoint(person)
                .with_entity(student)
                .with_entity(EntityId::new(99)),
        );

        assert!(matches!(
            result,
            Err(ConstructionError::UnknownEntity(id)) if id == EntityId::new(99)
        ));
        let parent = model.entity(person).expect("person exists");
        assert!(parent.specializations().is_empty());
        assert!(model.superclasses(student).is_empty());
    }

    #[test]
    fn test_relationships_of() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        let b = model.add_entity(Entity::regular("b"));

        let rel = model
            .add_relationship(
                Relationship::regular("self")
                    .with_link(Link::new(a, StructuralConstraint::partial_single()))
                    .with_link(Link::new(a, StructuralConstraint::partial_many())),
            )
            .expect("regular relationships always add");

        assert_eq!(model.relationships_of(a), vec![rel]);
        assert!(model.relationships_of(b).is_empty());
    }
}
