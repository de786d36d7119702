//! Structural constraints on relationship participation.
//!
//! A structural constraint is the `(min, max)` pair bounding how often an
//! entity takes part in a relationship. The bounds are stored exactly as
//! declared so that malformed constraints (wrong arity, negative minimum,
//! unknown maximum marker) survive construction and can be reported by the
//! validator.

use std::fmt;

/// The literal marker used for an unbounded maximum.
pub const MANY: &str = "N";

/// A single declared bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bound {
    /// An integer bound. Negative values are representable but invalid.
    Count(i64),
    /// The unbounded "many" sentinel.
    Many,
    /// Any other declared value.
    Other(String),
}

impl Bound {
    /// Returns the bound as a non-negative count, if it is one.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Bound::Count(count) => u64::try_from(*count).ok(),
            Bound::Many | Bound::Other(_) => None,
        }
    }
}

impl From<i64> for Bound {
    fn from(count: i64) -> Self {
        Bound::Count(count)
    }
}

impl From<i32> for Bound {
    fn from(count: i32) -> Self {
        Bound::Count(i64::from(count))
    }
}

impl From<u32> for Bound {
    fn from(count: u32) -> Self {
        Bound::Count(i64::from(count))
    }
}

impl From<&str> for Bound {
    /// `"N"` and `"many"` (in any case) become [`Bound::Many`].
    fn from(text: &str) -> Self {
        if text.eq_ignore_ascii_case(MANY) || text.eq_ignore_ascii_case("many") {
            Bound::Many
        } else {
            Bound::Other(text.to_string())
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Count(count) => write!(f, "{count}"),
            Bound::Many => f.write_str(MANY),
            Bound::Other(text) => f.write_str(text),
        }
    }
}

/// A well-formed maximum participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Bounded(u64),
    Many,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Bounded(count) => write!(f, "{count}"),
            Cardinality::Many => f.write_str(MANY),
        }
    }
}

/// Why a structural constraint is not of the form `(min, max)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintDefect {
    /// The constraint does not have exactly two bounds.
    Arity(usize),
    /// The minimum is not a non-negative integer.
    Min,
    /// The maximum is neither a non-negative integer nor "many".
    Max,
}

impl fmt::Display for ConstraintDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintDefect::Arity(len) => write!(f, "expected 2 bounds, found {len}"),
            ConstraintDefect::Min => write!(f, "min is not a non-negative integer"),
            ConstraintDefect::Max => {
                write!(f, "max is neither a non-negative integer nor {MANY}")
            }
        }
    }
}

/// The declared `(min, max)` bounds of a link.
///
/// # Example
///
/// ```
/// use eerkit_core::model::{Cardinality, StructuralConstraint};
///
/// let constraint = StructuralConstraint::new(1, "N");
/// assert_eq!(constraint.check(), Ok((1, Cardinality::Many)));
/// assert_eq!(constraint.to_string(), "(1,N)");
///
/// assert!(StructuralConstraint::new(-1, 5).check().is_err());
/// assert!(StructuralConstraint::new(0, "x").check().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralConstraint {
    bounds: Vec<Bound>,
}

impl StructuralConstraint {
    /// Creates a two-bound constraint.
    pub fn new(min: impl Into<Bound>, max: impl Into<Bound>) -> Self {
        Self {
            bounds: vec![min.into(), max.into()],
        }
    }

    /// Creates a constraint from raw bounds of any arity.
    pub fn from_bounds(bounds: Vec<Bound>) -> Self {
        Self { bounds }
    }

    /// `(0,1)`
    pub fn partial_single() -> Self {
        Self::new(0, 1)
    }

    /// `(0,N)`
    pub fn partial_many() -> Self {
        Self::new(0, Bound::Many)
    }

    /// `(1,1)`
    pub fn total_single() -> Self {
        Self::new(1, 1)
    }

    /// `(1,N)`
    pub fn total_many() -> Self {
        Self::new(1, Bound::Many)
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Returns the declared minimum, if any bound was declared.
    pub fn min(&self) -> Option<&Bound> {
        self.bounds.first()
    }

    /// Returns the declared maximum, if a second bound was declared.
    pub fn max(&self) -> Option<&Bound> {
        self.bounds.get(1)
    }

    /// Checks the shape of the constraint.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstraintDefect`] found: arity, then minimum,
    /// then maximum.
    pub fn check(&self) -> Result<(u64, Cardinality), ConstraintDefect> {
        let [min, max] = self.bounds.as_slice() else {
            return Err(ConstraintDefect::Arity(self.bounds.len()));
        };

        let min = min.as_count().ok_or(ConstraintDefect::Min)?;
        let max = match max {
            Bound::Many => Cardinality::Many,
            bound => Cardinality::Bounded(bound.as_count().ok_or(ConstraintDefect::Max)?),
        };

        Ok((min, max))
    }

    /// Returns `true` if the constraint is a well-formed `(min, max)` pair.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

impl fmt::Display for StructuralConstraint {
    /// Renders as `(min,max)`, with the "many" sentinel as [`MANY`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, bound) in self.bounds.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{bound}")?;
        }
        f.write_str(")")
    }
}
