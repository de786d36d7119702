//! Elaboration of a parsed [`Document`] into a [`Model`].
//!
//! Entities are added first, in declaration order, so that specializations
//! and relationships can refer to any of them. Reference problems do not
//! stop elaboration: each one is recorded in the collector and the offending
//! declaration is skipped.

use indexmap::IndexMap;
use log::{debug, trace};
use toml::Spanned;

use eerkit_core::{
    model::{
        Attribute, Entity, EntityId, Link, Model, Relationship, Specialization,
        StructuralConstraint,
    },
    normalize::normalize_entity_name,
};

use crate::{
    document::{
        AttributeDecl, Document, EntityDecl, LinkDecl, RelationshipDecl, SpecializationDecl,
        bound_from_value,
    },
    error::{Diagnostic, DiagnosticCollector, LoadError},
    span::Span,
};

pub(crate) struct Builder {
    collector: DiagnosticCollector,
    /// First definition of every entity and relationship name.
    declared: IndexMap<String, Span>,
    entities: IndexMap<String, EntityId>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
            declared: IndexMap::new(),
            entities: IndexMap::new(),
        }
    }

    pub fn build(mut self, document: Document) -> Result<Model, LoadError> {
        let Document {
            name,
            description,
            authors,
            entities,
            specializations,
            relationships,
        } = document;

        let mut model = Model::new(name, description, authors);

        debug!(count = entities.len(); "Elaborating entities");
        for decl in entities {
            self.add_entity(&mut model, decl);
        }

        debug!(count = specializations.len(); "Elaborating specializations");
        for decl in specializations {
            self.add_specialization(&mut model, decl);
        }

        debug!(count = relationships.len(); "Elaborating relationships");
        for decl in relationships {
            self.add_relationship(&mut model, decl);
        }

        self.collector.finish()?;
        Ok(model)
    }

    fn add_entity(&mut self, model: &mut Model, decl: EntityDecl) {
        let span = Span::from(decl.name.span());
        let mut entity = Entity::new(decl.kind.into(), decl.name.get_ref());
        if !self.declare(entity.name(), span) {
            return;
        }

        for attribute in &decl.attributes {
            entity.add(build_attribute(attribute));
        }

        let name = entity.name().to_string();
        let id = model.add_entity(entity);
        trace!(entity = name, id:? = id; "Entity elaborated");
        self.entities.insert(name, id);
    }

    fn add_specialization(&mut self, model: &mut Model, decl: SpecializationDecl) {
        let parent = match &decl.parent {
            Some(parent) => match self.resolve(parent) {
                Some(id) => Some(id),
                None => return,
            },
            None => None,
        };

        let mut specialization = match Specialization::new(decl.kind.into(), parent) {
            Ok(specialization) => specialization,
            Err(err) => {
                let first = decl.derived.first().map(|name| Span::from(name.span()));
                self.collector.emit(Diagnostic::construction(&err, first));
                return;
            }
        };
        specialization = specialization
            .with_role(&decl.role)
            .with_total(decl.total);

        for derived in &decl.derived {
            if let Some(id) = self.resolve(derived) {
                specialization.add(id);
            }
        }

        if let Err(err) = model.specialize(specialization) {
            let span = decl.parent.as_ref().map(|parent| Span::from(parent.span()));
            self.collector.emit(Diagnostic::construction(&err, span));
        }
    }

    fn add_relationship(&mut self, model: &mut Model, decl: RelationshipDecl) {
        let span = Span::from(decl.name.span());
        let mut relationship = Relationship::new(decl.kind.into(), decl.name.get_ref());
        if !self.declare(relationship.name(), span) {
            return;
        }

        let mut resolved = true;
        for link in &decl.links {
            match self.build_link(link) {
                Some(link) => relationship = relationship.with_link(link),
                None => resolved = false,
            }
        }
        if !resolved {
            return;
        }

        for attribute in &decl.attributes {
            relationship.add(build_attribute(attribute));
        }

        if let Err(err) = model.add_relationship(relationship) {
            self.collector.emit(Diagnostic::construction(&err, Some(span)));
        }
    }

    /// Builds a link. Returns `None` if its participant names an undeclared
    /// entity; a link without any participant is kept for the validator.
    fn build_link(&mut self, decl: &LinkDecl) -> Option<Link> {
        let entity = match &decl.entity {
            Some(name) => Some(self.resolve(name)?),
            None => None,
        };
        let constraint = decl.constraint.as_ref().map(|bounds| {
            StructuralConstraint::from_bounds(bounds.iter().map(bound_from_value).collect())
        });

        Some(Link::from_parts(entity, constraint).with_role(&decl.role))
    }

    /// Records a node name. Returns `false` and reports it if it is taken.
    fn declare(&mut self, name: &str, span: Span) -> bool {
        if name.is_empty() {
            self.collector.emit(Diagnostic::empty_name(span));
        }
        if let Some(&first) = self.declared.get(name) {
            self.collector.emit(Diagnostic::duplicate_name(name, span, first));
            return false;
        }
        self.declared.insert(name.to_string(), span);
        true
    }

    fn resolve(&mut self, name: &Spanned<String>) -> Option<EntityId> {
        let normalized = normalize_entity_name(name.get_ref());
        let id = self.entities.get(&normalized).copied();
        if id.is_none() {
            self.collector
                .emit(Diagnostic::undeclared_entity(&normalized, name.span().into()));
        }
        id
    }
}

fn build_attribute(decl: &AttributeDecl) -> Attribute {
    let mut attribute = Attribute::new(decl.kind.into(), &decl.name).with_key(decl.key);
    for component in &decl.components {
        attribute.add(build_attribute(component));
    }
    attribute
}
