//! Attributes of entities and relationships.

use std::fmt;

use crate::normalize::normalize_attribute_name;

/// The variant of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeKind {
    /// A plain, single-valued attribute.
    #[default]
    Simple,
    /// An attribute made up of component attributes.
    Composite,
    /// An attribute whose value is computed from other data.
    Derived,
    /// An attribute that can hold several values.
    Multivalued,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Simple => write!(f, "simple"),
            AttributeKind::Composite => write!(f, "composite"),
            AttributeKind::Derived => write!(f, "derived"),
            AttributeKind::Multivalued => write!(f, "multivalued"),
        }
    }
}

/// An attribute with a normalized name, a key flag and optional components.
///
/// Components may be of any kind, including further composites.
///
/// # Example
///
/// ```
/// use eerkit_core::model::{Attribute, AttributeKind};
///
/// let name = Attribute::simple("name")
///     .with_component(Attribute::simple("first name"))
///     .with_component(Attribute::simple("last name"));
///
/// assert_eq!(name.kind(), AttributeKind::Composite);
/// assert_eq!(name.components()[0].name(), "First_Name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    kind: AttributeKind,
    name: String,
    key: bool,
    components: Vec<Attribute>,
}

impl Attribute {
    /// Creates an attribute of the given kind. The name is normalized.
    pub fn new(kind: AttributeKind, name: &str) -> Self {
        Self {
            kind,
            name: normalize_attribute_name(name),
            key: false,
            components: Vec::new(),
        }
    }

    pub fn simple(name: &str) -> Self {
        Self::new(AttributeKind::Simple, name)
    }

    pub fn composite(name: &str) -> Self {
        Self::new(AttributeKind::Composite, name)
    }

    pub fn derived(name: &str) -> Self {
        Self::new(AttributeKind::Derived, name)
    }

    pub fn multivalued(name: &str) -> Self {
        Self::new(AttributeKind::Multivalued, name)
    }

    /// Flags this attribute as a (primary or partial) key candidate.
    pub fn as_key(mut self) -> Self {
        self.key = true;
        self
    }

    /// Sets the key flag.
    pub fn with_key(mut self, key: bool) -> Self {
        self.key = key;
        self
    }

    /// Appends a component and returns the attribute, for chained construction.
    pub fn with_component(mut self, component: Attribute) -> Self {
        self.add(component);
        self
    }

    /// Appends a component attribute.
    ///
    /// A [`AttributeKind::Simple`] attribute becomes
    /// [`AttributeKind::Composite`]; derived and multivalued attributes keep
    /// their kind.
    pub fn add(&mut self, component: Attribute) -> &mut Self {
        if self.kind == AttributeKind::Simple {
            self.kind = AttributeKind::Composite;
        }
        self.components.push(component);
        self
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_key(&self) -> bool {
        self.key
    }

    pub fn components(&self) -> &[Attribute] {
        &self.components
    }

    /// Returns `true` if this attribute has component attributes.
    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }
}
