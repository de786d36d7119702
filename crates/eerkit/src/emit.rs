//! Graphviz DOT emission.
//!
//! The diagram is written in three passes over the model:
//!
//! 1. every entity with its attributes, each in its own subgraph;
//! 2. the specializations of every entity;
//! 3. every relationship with its attributes, followed by its links.
//!
//! A caption and the `overlap` directive close the graph. Emission does not
//! look at validation results: links without a participant or constraint
//! and other invalid parts are drawn as far as they can be.

use std::fmt::{self, Write};

use log::{debug, trace};

use eerkit_core::model::{
    Attribute, AttributeKind, Entity, Model, Relationship, Specialization, SpecializationKind,
};

use crate::config::StyleConfig;

/// Emits `model` as DOT text.
///
/// # Example
///
/// ```
/// # use eerkit::config::StyleConfig;
/// # use eerkit::emit::emit;
/// # use eerkit::model::{Entity, Model};
/// let mut model = Model::new("Tiny", "", vec![]);
/// model.add_entity(Entity::regular("thing"));
///
/// let dot = emit(&model, &StyleConfig::default());
/// assert!(dot.starts_with("graph ER\n{\n"));
/// assert!(dot.contains("\"THING\" [shape=box"));
/// ```
pub fn emit(model: &Model, style: &StyleConfig) -> String {
    let mut out = String::new();
    Emitter::new(model, style)
        .write(&mut out)
        .expect("Writing to String buffer is infallible");
    out
}

/// Streams the DOT form of a model into any [`fmt::Write`].
pub struct Emitter<'a> {
    model: &'a Model,
    style: &'a StyleConfig,
}

impl<'a> Emitter<'a> {
    pub fn new(model: &'a Model, style: &'a StyleConfig) -> Self {
        Self { model, style }
    }

    /// Writes the whole graph.
    pub fn write<W: Write>(&self, out: &mut W) -> fmt::Result {
        debug!(model = self.model.name(); "Emitting diagram");
        out.write_str("graph ER\n{\n")?;

        for (_, entity) in self.model.entities() {
            self.write_entity(out, entity)?;
            out.write_str("\n")?;
        }

        for (_, entity) in self.model.entities() {
            if entity.specializations().is_empty() {
                continue;
            }
            for (idx, spec) in entity.specializations().iter().enumerate() {
                self.write_specialization(out, entity, spec, idx)?;
            }
            out.write_str("\n")?;
        }

        out.write_str("\n\n")?;

        for (_, relationship) in self.model.relationships() {
            self.write_relationship(out, relationship)?;
            out.write_str("\n")?;
        }

        writeln!(out, "\n\tlabel = \"{}\"", self.caption())?;
        writeln!(out, "\toverlap = {}", dot_id(self.style.overlap()))?;
        out.write_str("}\n")
    }

    fn write_entity<W: Write>(&self, out: &mut W, entity: &Entity) -> fmt::Result {
        trace!(entity = entity.name(); "Writing entity");
        out.write_str("\tsubgraph {\n")?;

        let name = entity.name();
        write!(
            out,
            "\t\t\"{}\" [shape=box,fillcolor=\"{}\",style=\"filled,solid\",label=\"{}\"",
            escape(name),
            escape(self.style.entity_fill()),
            escape(name)
        )?;
        if entity.is_weak() {
            out.write_str(",peripheries=2")?;
        }
        out.write_str("];\n")?;

        for attribute in entity.attributes() {
            self.write_attribute(out, name, attribute)?;
        }

        out.write_str("\t}")
    }

    /// Writes an attribute node and its edge to `owner`, then its components
    /// with the attribute node as their owner.
    fn write_attribute<W: Write>(
        &self,
        out: &mut W,
        owner: &str,
        attribute: &Attribute,
    ) -> fmt::Result {
        let node = format!("{owner}_a{}", attribute.name());

        let style = match attribute.kind() {
            AttributeKind::Multivalued => "peripheries=2,style=\"filled,solid\"",
            AttributeKind::Derived => "style=\"filled,dashed\"",
            _ if attribute.is_key() => "style=\"filled,solid,bold\"",
            _ => "style=\"filled,solid\"",
        };
        writeln!(
            out,
            "\t\t\"{}\" [shape=ellipse,fillcolor=\"{}\",label=\"{}\",{style}];",
            escape(&node),
            escape(self.style.attribute_fill()),
            escape(attribute.name())
        )?;
        writeln!(
            out,
            "\t\t\"{}\" -- \"{}\" [len=0.5];",
            escape(owner),
            escape(&node)
        )?;

        for component in attribute.components() {
            self.write_attribute(out, &node, component)?;
        }
        Ok(())
    }

    /// Writes one specialization of `parent`.
    ///
    /// With a single subclass the circle node is left out and the subclass
    /// hangs directly off the parent.
    fn write_specialization<W: Write>(
        &self,
        out: &mut W,
        parent: &Entity,
        spec: &Specialization,
        idx: usize,
    ) -> fmt::Result {
        let mut owner = escape(parent.name());

        if spec.derived().len() > 1 {
            let node = format!("{}_s{idx}", parent.name());
            let label = match spec.kind() {
                SpecializationKind::Disjoint => "d",
                SpecializationKind::Overlap => "o",
                SpecializationKind::Unspecified => "",
            };
            writeln!(
                out,
                "\t\"{}\" [shape=circle,fillcolor=\"{}\",style=\"filled,solid\",label=\"{label}\"];",
                escape(&node),
                escape(self.style.specialization_fill())
            )?;

            let mut opts = Vec::new();
            if spec.is_total() {
                opts.push("color=\"black:black\"".to_string());
            }
            if let Some(role) = spec.role() {
                opts.push(format!("label=\"{}\"", escape(role)));
            }
            opts.push("len=1.50".to_string());
            writeln!(
                out,
                "\t\"{owner}\" -- \"{}\" [{}];",
                escape(&node),
                opts.join(",")
            )?;

            owner = escape(&node);
        }

        for child in spec.derived().iter().filter_map(|&id| self.model.entity(id)) {
            writeln!(
                out,
                "\t\"{owner}\" -- \"{}\" [arrowhead=tee,dir=forward,len=1.30];",
                escape(child.name())
            )?;
        }
        Ok(())
    }

    fn write_relationship<W: Write>(
        &self,
        out: &mut W,
        relationship: &Relationship,
    ) -> fmt::Result {
        trace!(relationship = relationship.name(); "Writing relationship");
        out.write_str("\tsubgraph {\n")?;

        let name = relationship.name();
        write!(
            out,
            "\t\t\"{}\" [shape=diamond,fillcolor=\"{}\",style=\"filled,solid\",label=\"{}\"",
            escape(name),
            escape(self.style.relationship_fill()),
            escape(name)
        )?;
        if relationship.is_identifying() {
            out.write_str(",peripheries=2")?;
        }
        out.write_str("];\n")?;

        for attribute in relationship.attributes() {
            self.write_attribute(out, name, attribute)?;
        }
        out.write_str("\t}\n")?;

        // Links stay outside the subgraph so they can stretch.
        for (idx, link) in relationship.links().iter().enumerate() {
            let Some(entity) = link.entity().and_then(|id| self.model.entity(id)) else {
                debug!(relationship = name, link = idx; "Skipping link without participant");
                continue;
            };
            let label = link
                .constraint()
                .map(|constraint| format!("label=\"{}\",", escape(&constraint.to_string())))
                .unwrap_or_default();
            writeln!(
                out,
                "\t\"{}\" -- \"{}\" [{label}len=1.0];",
                escape(entity.name()),
                escape(name)
            )?;
        }
        Ok(())
    }

    /// Model name, description and authors as DOT `\n`-separated lines.
    fn caption(&self) -> String {
        let mut lines = vec![escape(self.model.name())];
        if !self.model.description().is_empty() {
            lines.push(escape(self.model.description()));
        }
        if !self.model.authors().is_empty() {
            lines.push(format!("by {}", escape(&self.model.authors_string())));
        }
        lines.join("\\n")
    }
}

/// Writes `value` bare when it is a plain DOT identifier, quoted otherwise.
fn dot_id(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        value.to_string()
    } else {
        format!("\"{}\"", escape(value))
    }
}

/// Escapes text for a DOT double-quoted string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            ch => escaped.push(ch),
        }
    }
    escaped
}
