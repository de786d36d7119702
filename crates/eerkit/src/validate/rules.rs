//! The built-in rules.

use log::trace;

use eerkit_core::model::{AttributeKind, Bound, Model};

use super::{ModelError, Rule, RuleFault};

/// Every entity has a key attribute: a primary key, or a partial key for a
/// weak entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityKeyRule;

impl Rule for EntityKeyRule {
    fn id(&self) -> &'static str {
        "entity-key"
    }

    fn description(&self) -> &'static str {
        "Does every entity have a primary key, or a partial key for a weak entity"
    }

    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault> {
        Ok(model
            .entities()
            .filter(|(_, entity)| entity.key().is_none())
            .map(|(_, entity)| ModelError::new(entity.name(), "Missing key attribute"))
            .collect())
    }
}

/// Every relationship has at least two links with a participant and a
/// well-formed `(min, max)` constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipDegreeRule;

impl Rule for RelationshipDegreeRule {
    fn id(&self) -> &'static str {
        "relationship-degree"
    }

    fn description(&self) -> &'static str {
        "Does every relationship have sufficient and valid participants"
    }

    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault> {
        let mut errors = Vec::new();

        for (_, relationship) in model.relationships() {
            let name = relationship.name();
            let mut valid = 0;

            for (idx, link) in relationship.links().iter().enumerate() {
                let participant = link.entity().and_then(|id| model.entity(id));
                let Some(constraint) = link.constraint() else {
                    if participant.is_none() {
                        errors.push(missing_participant(name, idx));
                    } else {
                        errors.push(
                            ModelError::new(
                                name,
                                "Relationship link has missing structural constraint",
                            )
                            .with_info(format!("i={idx}")),
                        );
                    }
                    continue;
                };

                if participant.is_none() {
                    errors.push(missing_participant(name, idx));
                } else if let Err(defect) = constraint.check() {
                    trace!(relationship = name, link = idx, defect:? ; "Malformed constraint");
                    errors.push(
                        ModelError::new(
                            name,
                            "Relationship link has structural constraint that isn't of the form \
                             (min,max), where min is a non-negative integer and max is a \
                             non-negative integer or N",
                        )
                        .with_info(format!("i={idx}, structCon={constraint}")),
                    );
                } else {
                    valid += 1;
                }
            }

            if valid < 2 {
                errors.push(
                    ModelError::new(name, "Relationship does not have at least 2 valid links")
                        .with_info(format!(
                            "validLinks={valid}/{}",
                            relationship.links().len()
                        )),
                );
            }
        }

        Ok(errors)
    }
}

fn missing_participant(relationship: &str, idx: usize) -> ModelError {
    ModelError::new(relationship, "Relationship link has missing participant")
        .with_info(format!("i={idx}"))
}

/// Every weak entity has an identifying relationship in which it takes part
/// mandatorily.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakEntityIdentificationRule;

impl Rule for WeakEntityIdentificationRule {
    fn id(&self) -> &'static str {
        "weak-entity-identification"
    }

    fn description(&self) -> &'static str {
        "Does every weak entity have an identifying relationship with mandatory participation"
    }

    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault> {
        let mut errors = Vec::new();

        for (id, entity) in model.entities().filter(|(_, entity)| entity.is_weak()) {
            let Some(relationship) = model
                .identifying_relationship(id)
                .and_then(|rel| model.relationship(rel))
            else {
                errors.push(ModelError::new(
                    entity.name(),
                    "Weak entity has no identifying relationship",
                ));
                continue;
            };

            for link in relationship
                .links()
                .iter()
                .filter(|link| link.entity() == Some(id))
            {
                let min = link.constraint().and_then(|constraint| constraint.min());
                let mandatory = matches!(min, Some(Bound::Count(count)) if *count >= 1);
                if !mandatory {
                    let min = min.map_or_else(|| "-".to_string(), ToString::to_string);
                    errors.push(
                        ModelError::new(
                            entity.name(),
                            "Weak entity does not participate mandatorily in its identifying \
                             relationship",
                        )
                        .with_info(format!("relationship={}, min={min}", relationship.name())),
                    );
                }
            }
        }

        Ok(errors)
    }
}

/// Every specialization has at least one subclass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecializationMembersRule;

impl Rule for SpecializationMembersRule {
    fn id(&self) -> &'static str {
        "specialization-members"
    }

    fn description(&self) -> &'static str {
        "Does every specialization have at least one subclass"
    }

    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault> {
        let mut errors = Vec::new();
        for (_, entity) in model.entities() {
            for (idx, spec) in entity.specializations().iter().enumerate() {
                if spec.derived().is_empty() {
                    errors.push(
                        ModelError::new(entity.name(), "Specialization has no subclasses")
                            .with_info(format!("s={idx}")),
                    );
                }
            }
        }
        Ok(errors)
    }
}

/// Key attributes are neither derived nor multivalued.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyAttributeKindRule;

impl Rule for KeyAttributeKindRule {
    fn id(&self) -> &'static str {
        "key-attribute-kind"
    }

    fn description(&self) -> &'static str {
        "Is every key attribute stored and single-valued"
    }

    fn run(&self, model: &Model) -> Result<Vec<ModelError>, RuleFault> {
        Ok(model
            .entities()
            .filter_map(|(_, entity)| {
                let key = entity.key()?;
                matches!(
                    key.kind(),
                    AttributeKind::Derived | AttributeKind::Multivalued
                )
                .then(|| {
                    ModelError::new(entity.name(), "Key attribute is derived or multivalued")
                        .with_info(format!("key={}, kind={}", key.name(), key.kind()))
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eerkit_core::model::{
        Attribute, Bound, Entity, EntityId, Link, Relationship, Specialization,
        StructuralConstraint,
    };

    fn reasons(errors: &[ModelError]) -> Vec<&str> {
        errors.iter().map(ModelError::reason).collect()
    }

    #[test]
    fn test_entity_key_one_error_per_keyless_entity() {
        let mut model = Model::new("M", "", Vec::new());
        model.add_entity(Entity::regular("a"));
        model.add_entity(Entity::regular("b").with_attribute(Attribute::simple("id").as_key()));
        model.add_entity(Entity::weak("c"));
        model.add_entity(Entity::weak("d").with_attribute(Attribute::simple("no").as_key()));

        let errors = EntityKeyRule.run(&model).unwrap();
        let items: Vec<_> = errors.iter().map(ModelError::item).collect();
        assert_eq!(items, vec!["A", "C"]);
        assert!(errors.iter().all(|e| e.info().is_none()));
    }

    #[test]
    fn test_second_key_is_not_an_error() {
        let mut model = Model::new("M", "", Vec::new());
        model.add_entity(
            Entity::regular("a")
                .with_attribute(Attribute::simple("x").as_key())
                .with_attribute(Attribute::simple("y").as_key()),
        );

        assert!(EntityKeyRule.run(&model).unwrap().is_empty());
    }

    #[test]
    fn test_degree_valid_binary_and_recursive() {
        let mut model = Model::new("M", "", Vec::new());
        let person = model.add_entity(Entity::regular("person"));
        let course = model.add_entity(Entity::regular("course"));
        model
            .add(
                Relationship::regular("takes")
                    .with_link(Link::new(person, StructuralConstraint::new(1, "N")))
                    .with_link(Link::new(course, StructuralConstraint::new(1, 1))),
            )
            .unwrap()
            .add(
                Relationship::regular("supervises")
                    .with_link(
                        Link::new(person, StructuralConstraint::partial_single())
                            .with_role("supervisor"),
                    )
                    .with_link(
                        Link::new(person, StructuralConstraint::partial_many())
                            .with_role("supervisee"),
                    ),
            )
            .unwrap();

        assert!(RelationshipDegreeRule.run(&model).unwrap().is_empty());
    }

    #[test]
    fn test_degree_per_link_errors_then_aggregate() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        model
            .add_relationship(
                Relationship::regular("r")
                    .with_link(Link::new(a, StructuralConstraint::new(0, 1)))
                    .with_link(Link::from_parts(None, Some(StructuralConstraint::new(0, 1))))
                    .with_link(Link::from_parts(Some(a), None))
                    .with_link(Link::new(a, StructuralConstraint::new(-1, 5))),
            )
            .unwrap();

        let errors = RelationshipDegreeRule.run(&model).unwrap();
        assert_eq!(
            reasons(&errors)[..2],
            [
                "Relationship link has missing participant",
                "Relationship link has missing structural constraint",
            ]
        );
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].info(), Some("i=1"));
        assert_eq!(errors[1].info(), Some("i=2"));
        assert_eq!(errors[2].info(), Some("i=3, structCon=(-1,5)"));
        assert_eq!(
            errors[3].reason(),
            "Relationship does not have at least 2 valid links"
        );
        assert_eq!(errors[3].info(), Some("validLinks=1/4"));
        assert!(errors.iter().all(|e| e.item() == "R"));
    }

    #[test]
    fn test_degree_unresolved_handle_is_missing_participant() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        model
            .add_relationship(
                Relationship::regular("r")
                    .with_link(Link::new(a, StructuralConstraint::total_single()))
                    .with_link(Link::new(EntityId::new(42), StructuralConstraint::total_single())),
            )
            .unwrap();

        let errors = RelationshipDegreeRule.run(&model).unwrap();
        assert_eq!(
            reasons(&errors),
            vec![
                "Relationship link has missing participant",
                "Relationship does not have at least 2 valid links",
            ]
        );
    }

    #[test]
    fn test_degree_malformed_shapes() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        let b = model.add_entity(Entity::regular("b"));
        model
            .add_relationship(
                Relationship::regular("r")
                    .with_link(Link::new(a, StructuralConstraint::new(0, "x")))
                    .with_link(Link::new(
                        b,
                        StructuralConstraint::from_bounds(vec![Bound::Count(1)]),
                    )),
            )
            .unwrap();

        let errors = RelationshipDegreeRule.run(&model).unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].info(), Some("i=0, structCon=(0,x)"));
        assert_eq!(errors[1].info(), Some("i=1, structCon=(1)"));
        assert_eq!(errors[2].info(), Some("validLinks=0/2"));
    }

    #[test]
    fn test_degree_unary_relationship() {
        let mut model = Model::new("M", "", Vec::new());
        let a = model.add_entity(Entity::regular("a"));
        model
            .add_relationship(
                Relationship::regular("r")
                    .with_link(Link::new(a, StructuralConstraint::partial_many())),
            )
            .unwrap();

        let errors = RelationshipDegreeRule.run(&model).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].info(), Some("validLinks=1/1"));
    }

    fn weak_model(min: impl Into<Bound>) -> Model {
        let mut model = Model::new("M", "", Vec::new());
        let owner = model.add_entity(Entity::regular("owner"));
        let item = model.add_entity(Entity::weak("item"));
        model
            .add_relationship(
                Relationship::identifying("has")
                    .with_link(Link::new(owner, StructuralConstraint::partial_many()))
                    .with_link(Link::new(item, StructuralConstraint::new(min, 1))),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_weak_entity_optional_participation() {
        let errors = WeakEntityIdentificationRule.run(&weak_model(0)).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].item(), "ITEM");
        assert_eq!(errors[0].info(), Some("relationship=HAS, min=0"));
    }

    #[test]
    fn test_weak_entity_mandatory_participation() {
        assert!(
            WeakEntityIdentificationRule
                .run(&weak_model(1))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_weak_entity_malformed_min() {
        let errors = WeakEntityIdentificationRule.run(&weak_model("N")).unwrap();
        assert_eq!(errors[0].info(), Some("relationship=HAS, min=N"));
    }

    #[test]
    fn test_weak_entity_without_identifying_relationship() {
        let mut model = Model::new("M", "", Vec::new());
        model.add_entity(Entity::weak("orphan"));

        let errors = WeakEntityIdentificationRule.run(&model).unwrap();
        assert_eq!(
            reasons(&errors),
            vec!["Weak entity has no identifying relationship"]
        );
    }

    #[test]
    fn test_weak_entity_missing_constraint() {
        let mut model = Model::new("M", "", Vec::new());
        let owner = model.add_entity(Entity::regular("owner"));
        let item = model.add_entity(Entity::weak("item"));
        model
            .add_relationship(
                Relationship::identifying("has")
                    .with_link(Link::new(owner, StructuralConstraint::partial_many()))
                    .with_link(Link::from_parts(Some(item), None)),
            )
            .unwrap();

        let errors = WeakEntityIdentificationRule.run(&model).unwrap();
        assert_eq!(errors[0].info(), Some("relationship=HAS, min=-"));
    }

    #[test]
    fn test_specialization_members() {
        let mut model = Model::new("M", "", Vec::new());
        let person = model.add_entity(Entity::regular("person"));
        let student = model.add_entity(Entity::regular("student"));
        model
            .specialize(Specialization::disjoint(person).with_entity(student))
            .unwrap()
            .specialize(Specialization::overlap(person))
            .unwrap();

        let errors = SpecializationMembersRule.run(&model).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].item(), "PERSON");
        assert_eq!(errors[0].info(), Some("s=1"));
    }

    #[test]
    fn test_key_attribute_kind() {
        let mut model = Model::new("M", "", Vec::new());
        model.add_entity(Entity::regular("a").with_attribute(Attribute::derived("age").as_key()));
        model.add_entity(
            Entity::regular("b").with_attribute(Attribute::multivalued("phones").as_key()),
        );
        model.add_entity(Entity::regular("c").with_attribute(Attribute::simple("id").as_key()));

        let errors = KeyAttributeKindRule.run(&model).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].info(), Some("key=Age, kind=derived"));
        assert_eq!(errors[1].item(), "B");
    }
}
