//! Bridges from kernel contracts to the standard comparison traits.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::equality::equals;
use crate::field::ValueType;
use crate::hash::hash;
use crate::ordering::{compare, Ordered};

/// Wraps a value type so std collections use its kernel contracts.
///
/// `Eq` and `Hash` come from the key fields; `Ord` comes from the declared
/// order. For a type whose order is inconsistent with equality, a
/// `BTreeSet<Keyed<T>>` and a `HashSet<Keyed<T>>` holding the same
/// values may differ in size. `Eq` is only lawful for values without NaN in
/// numeric float fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keyed<T>(pub T);

impl<T> Keyed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Keyed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Keyed<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: ValueType> PartialEq for Keyed<T> {
    fn eq(&self, other: &Self) -> bool {
        equals(&self.0, &other.0)
    }
}

impl<T: ValueType> Eq for Keyed<T> {}

impl<T: ValueType> Hash for Keyed<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash(&self.0));
    }
}

impl<T: Ordered> PartialOrd for Keyed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ordered> Ord for Keyed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}
