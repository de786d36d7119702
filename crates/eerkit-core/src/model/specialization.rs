//! Superclass/subclass groupings.

use std::{collections::HashSet, fmt};

use super::{EntityId, Model};
use crate::{ConstructionError, normalize::normalize_attribute_name};

/// The variant of a [`Specialization`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecializationKind {
    /// Subclasses are mutually exclusive.
    Disjoint,
    /// Subclasses may overlap.
    Overlap,
    /// No constraint between subclasses was declared.
    #[default]
    Unspecified,
}

impl fmt::Display for SpecializationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecializationKind::Disjoint => write!(f, "disjoint"),
            SpecializationKind::Overlap => write!(f, "overlap"),
            SpecializationKind::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// A specialization of a parent entity into derived (subclass) entities.
///
/// The specialization is stored in its parent's list, while the derived
/// entities stay owned by the [`Model`] and are referred to by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialization {
    kind: SpecializationKind,
    parent: EntityId,
    role: Option<String>,
    total: bool,
    derived: Vec<EntityId>,
}

impl Specialization {
    /// Creates a total specialization of `parent` without a role.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::MissingParent`] if `parent` is `None`.
    pub fn new(
        kind: SpecializationKind,
        parent: Option<EntityId>,
    ) -> Result<Self, ConstructionError> {
        let parent = parent.ok_or(ConstructionError::MissingParent)?;
        Ok(Self::with_parent(kind, parent))
    }

    pub fn disjoint(parent: EntityId) -> Self {
        Self::with_parent(SpecializationKind::Disjoint, parent)
    }

    pub fn overlap(parent: EntityId) -> Self {
        Self::with_parent(SpecializationKind::Overlap, parent)
    }

    /// Sets the discriminating role. The name is normalized like an
    /// attribute name; an empty role means none.
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = (!role.is_empty()).then(|| normalize_attribute_name(role));
        self
    }

    /// Sets whether the specialization is total (covering) or partial.
    pub fn with_total(mut self, total: bool) -> Self {
        self.total = total;
        self
    }

    /// Adds a derived entity and returns the specialization, for chained
    /// construction.
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.add(entity);
        self
    }

    /// Appends a derived entity.
    pub fn add(&mut self, entity: EntityId) -> &mut Self {
        self.derived.push(entity);
        self
    }

    pub fn kind(&self) -> SpecializationKind {
        self.kind
    }

    pub fn parent(&self) -> EntityId {
        self.parent
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_total(&self) -> bool {
        self.total
    }

    /// Returns the derived entities in declaration order.
    pub fn derived(&self) -> &[EntityId] {
        &self.derived
    }

    /// Returns `true` if `entity` is a subclass in this specialization.
    ///
    /// With `recursive`, subclasses of subclasses (through their own
    /// specializations in `model`) count as well.
    pub fn has_subclass(&self, model: &Model, entity: EntityId, recursive: bool) -> bool {
        if !recursive {
            return self.derived.contains(&entity);
        }

        let mut visited = HashSet::new();
        let mut pending = self.derived.clone();
        while let Some(candidate) = pending.pop() {
            if candidate == entity {
                return true;
            }
            if !visited.insert(candidate) {
                continue;
            }
            if let Some(sub) = model.entity(candidate) {
                for spec in sub.specializations() {
                    pending.extend_from_slice(spec.derived());
                }
            }
        }
        false
    }

    fn with_parent(kind: SpecializationKind, parent: EntityId) -> Self {
        Self {
            kind,
            parent,
            role: None,
            total: true,
            derived: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    #[test]
    fn test_missing_parent_fails() {
        let result = Specialization::new(SpecializationKind::Overlap, None);
        assert_eq!(result, Err(ConstructionError::MissingParent));
    }

    #[test]
    fn test_defaults() {
        let spec = Specialization::new(SpecializationKind::Disjoint, Some(EntityId::new(3)))
            .expect("parent given");

        assert_eq!(spec.parent(), EntityId::new(3));
        assert!(spec.is_total());
        assert!(spec.role().is_none());
        assert!(spec.derived().is_empty());
    }

    #[test]
    fn test_role_is_normalized() {
        let spec = Specialization::disjoint(EntityId::new(0)).with_role("job type");
        assert_eq!(spec.role(), Some("Job_Type"));

        let spec = Specialization::disjoint(EntityId::new(0)).with_role("");
        assert_eq!(spec.role(), None);
    }

    #[test]
    fn test_has_subclass_direct_and_recursive() {
        let mut model = Model::new("Org", "", Vec::new());
        let person = model.add_entity(Entity::regular("person"));
        let employee = model.add_entity(Entity::regular("employee"));
        let manager = model.add_entity(Entity::regular("manager"));

        model
            .specialize(Specialization::overlap(employee).with_entity(manager))
            .expect("employee exists");
        let spec = Specialization::disjoint(person).with_entity(employee);

        assert!(spec.has_subclass(&model, employee, false));
        assert!(!spec.has_subclass(&model, manager, false));
        assert!(spec.has_subclass(&model, manager, true));
        assert!(!spec.has_subclass(&model, person, true));
    }
}
