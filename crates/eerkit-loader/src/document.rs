//! The serialized form of a schema description.
//!
//! These types mirror the TOML layout one to one. Names that other
//! declarations refer to keep their source span for diagnostics.

use serde::Deserialize;
use toml::{Spanned, Value};

use eerkit_core::model::{
    AttributeKind, Bound, EntityKind, RelationshipKind, SpecializationKind,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Document {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityDecl>,
    #[serde(default, rename = "specialization")]
    pub specializations: Vec<SpecializationDecl>,
    #[serde(default, rename = "relationship")]
    pub relationships: Vec<RelationshipDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EntityDecl {
    pub name: Spanned<String>,
    #[serde(default)]
    pub kind: EntityKindDecl,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AttributeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: AttributeKindDecl,
    #[serde(default)]
    pub key: bool,
    #[serde(default)]
    pub components: Vec<AttributeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpecializationDecl {
    pub parent: Option<Spanned<String>>,
    #[serde(default)]
    pub kind: SpecializationKindDecl,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_total")]
    pub total: bool,
    #[serde(default)]
    pub derived: Vec<Spanned<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RelationshipDecl {
    pub name: Spanned<String>,
    #[serde(default)]
    pub kind: RelationshipKindDecl,
    #[serde(default)]
    pub links: Vec<LinkDecl>,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LinkDecl {
    pub entity: Option<Spanned<String>>,
    pub constraint: Option<Vec<Value>>,
    #[serde(default)]
    pub role: String,
}

fn default_total() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EntityKindDecl {
    #[default]
    Regular,
    Weak,
}

impl From<EntityKindDecl> for EntityKind {
    fn from(kind: EntityKindDecl) -> Self {
        match kind {
            EntityKindDecl::Regular => EntityKind::Regular,
            EntityKindDecl::Weak => EntityKind::Weak,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AttributeKindDecl {
    #[default]
    Simple,
    Composite,
    Derived,
    Multivalued,
}

impl From<AttributeKindDecl> for AttributeKind {
    fn from(kind: AttributeKindDecl) -> Self {
        match kind {
            AttributeKindDecl::Simple => AttributeKind::Simple,
            AttributeKindDecl::Composite => AttributeKind::Composite,
            AttributeKindDecl::Derived => AttributeKind::Derived,
            AttributeKindDecl::Multivalued => AttributeKind::Multivalued,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SpecializationKindDecl {
    Disjoint,
    Overlap,
    #[default]
    Unspecified,
}

impl From<SpecializationKindDecl> for SpecializationKind {
    fn from(kind: SpecializationKindDecl) -> Self {
        match kind {
            SpecializationKindDecl::Disjoint => SpecializationKind::Disjoint,
            SpecializationKindDecl::Overlap => SpecializationKind::Overlap,
            SpecializationKindDecl::Unspecified => SpecializationKind::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RelationshipKindDecl {
    #[default]
    Regular,
    Identifying,
}

impl From<RelationshipKindDecl> for RelationshipKind {
    fn from(kind: RelationshipKindDecl) -> Self {
        match kind {
            RelationshipKindDecl::Regular => RelationshipKind::Regular,
            RelationshipKindDecl::Identifying => RelationshipKind::Identifying,
        }
    }
}

/// Converts one element of a `constraint` array.
///
/// Integers are counts and strings go through the "many" sentinel check.
/// Anything else is kept verbatim so the validator can report it.
pub(crate) fn bound_from_value(value: &Value) -> Bound {
    match value {
        Value::Integer(count) => Bound::Count(*count),
        Value::String(text) => Bound::from(text.as_str()),
        other => Bound::Other(other.to_string()),
    }
}
