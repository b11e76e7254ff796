//! Ordering composed from chained per-field comparisons.
//!
//! A chain runs its steps in declared priority and returns the first result
//! that is not `Equal`. Numeric steps use `Ord::cmp` and `f64::total_cmp`;
//! nothing here compares by subtraction, which overflows and breaks
//! transitivity.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::SchemaError;
use crate::field::{FieldValue, Structural, ValueType};

/// Whether `compare(a, b) == Equal` implies `equals(a, b)` for a type.
///
/// When it does not, hash-based and order-based collections of the type
/// disagree about which elements are duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderConsistency {
    ConsistentWithEquals,
    InconsistentWithEquals,
}

enum OrderKey<T: 'static> {
    Int(fn(&T) -> i64),
    Float(fn(&T) -> f64),
    By(fn(&T, &T) -> Ordering),
}

impl<T: 'static> Clone for OrderKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for OrderKey<T> {}

/// One comparison step of a chain.
pub struct OrderStep<T: 'static> {
    name: &'static str,
    key: OrderKey<T>,
    descending: bool,
}

impl<T: 'static> Clone for OrderStep<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for OrderStep<T> {}

impl<T: 'static> OrderStep<T> {
    /// Compare an integer key.
    pub const fn int(name: &'static str, get: fn(&T) -> i64) -> Self {
        Self {
            name,
            key: OrderKey::Int(get),
            descending: false,
        }
    }

    /// Compare a floating-point key by IEEE 754 total order.
    ///
    /// `-0.0` sorts before `0.0` and NaN sorts after every number.
    pub const fn float(name: &'static str, get: fn(&T) -> f64) -> Self {
        Self {
            name,
            key: OrderKey::Float(get),
            descending: false,
        }
    }

    /// Compare with a custom function, typically delegating to the nested
    /// type's own order. The function must itself be a total order.
    pub const fn by(name: &'static str, cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            name,
            key: OrderKey::By(cmp),
            descending: false,
        }
    }

    /// The same step with its direction flipped.
    pub const fn reversed(self) -> Self {
        Self {
            name: self.name,
            key: self.key,
            descending: !self.descending,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn apply(&self, a: &T, b: &T) -> Ordering {
        let ord = match self.key {
            OrderKey::Int(get) => get(a).cmp(&get(b)),
            OrderKey::Float(get) => get(a).total_cmp(&get(b)),
            OrderKey::By(cmp) => cmp(a, b),
        };
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl<T: 'static> fmt::Debug for OrderStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.key {
            OrderKey::Int(_) => "int",
            OrderKey::Float(_) => "float",
            OrderKey::By(_) => "by",
        };
        f.debug_struct("OrderStep")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("descending", &self.descending)
            .finish()
    }
}

/// A value type with a declared natural order.
pub trait Ordered: ValueType {
    /// Comparison chain in priority order.
    const ORDER: &'static [OrderStep<Self>];

    const CONSISTENCY: OrderConsistency = OrderConsistency::ConsistentWithEquals;
}

/// Compare two values by their declared order.
pub fn compare<T: Ordered>(a: &T, b: &T) -> Ordering {
    compare_steps(T::ORDER, a, b)
}

/// Run a comparison chain.
pub fn compare_steps<T: 'static>(steps: &[OrderStep<T>], a: &T, b: &T) -> Ordering {
    for step in steps {
        let ord = step.apply(a, b);
        if ord.is_ne() {
            return ord;
        }
    }
    Ordering::Equal
}

/// Check an order declaration.
pub fn validate_order<T: Ordered>() -> Result<(), SchemaError> {
    if T::ORDER.is_empty() {
        return Err(SchemaError::EmptyOrder(T::TYPE_NAME));
    }
    Ok(())
}

/// Compare two type-erased values field by field in key-field order.
///
/// Absent values sort first and floats compare by total order. Values of
/// different domains order by domain name and are never `Equal`, matching
/// [`structural_equals`](crate::equality::structural_equals).
pub fn structural_compare(a: &dyn Structural, b: &dyn Structural) -> Ordering {
    let common = a.key_count().min(b.key_count());
    a.type_name().cmp(b.type_name()).then_with(|| {
        (0..common)
            .map(|i| values_compare(a.key_value(i), b.key_value(i)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.key_count().cmp(&b.key_count()))
    })
}

/// Total order over field values.
pub fn values_compare(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Int(x), FieldValue::Int(y)) => x.cmp(&y),
        (
            FieldValue::Float(x) | FieldValue::FloatBits(x),
            FieldValue::Float(y) | FieldValue::FloatBits(y),
        ) => x.total_cmp(&y),
        (FieldValue::Nested(x), FieldValue::Nested(y)) => structural_compare(x, y),
        (a, b) => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Null => 0,
        FieldValue::Int(_) => 1,
        FieldValue::Float(_) | FieldValue::FloatBits(_) => 2,
        FieldValue::Nested(_) => 3,
    }
}

/// A comparison chain assembled at runtime.
pub struct Comparator<T: 'static> {
    steps: Vec<OrderStep<T>>,
}

impl<T: 'static> Comparator<T> {
    pub fn comparing(step: OrderStep<T>) -> Self {
        Self { steps: vec![step] }
    }

    /// Append a tie-break step.
    pub fn then(mut self, step: OrderStep<T>) -> Self {
        self.steps.push(step);
        self
    }

    /// The reverse order: every step flipped.
    pub fn reversed(self) -> Self {
        Self {
            steps: self.steps.into_iter().map(OrderStep::reversed).collect(),
        }
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        compare_steps(&self.steps, a, b)
    }

    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    pub fn steps(&self) -> &[OrderStep<T>] {
        &self.steps
    }
}

impl<T: Ordered> Comparator<T> {
    /// The type's declared order.
    pub fn natural() -> Self {
        Self {
            steps: T::ORDER.to_vec(),
        }
    }
}

impl<T: 'static> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.steps).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::KeyField;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Profile {
        height: i64,
        weight: f64,
        age: i64,
    }

    impl ValueType for Profile {
        const TYPE_NAME: &'static str = "Profile";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::int("height", |p| p.height),
            KeyField::float_bits("weight", |p| p.weight),
            KeyField::int("age", |p| p.age),
        ];
    }

    impl Ordered for Profile {
        const ORDER: &'static [OrderStep<Self>] = &[
            OrderStep::int("height", |p| p.height),
            OrderStep::float("weight", |p| p.weight),
            OrderStep::int("age", |p| p.age),
        ];
    }

    struct Stature {
        height: i64,
        weight: f64,
        age: i64,
    }

    impl ValueType for Stature {
        const TYPE_NAME: &'static str = "Stature";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::int("height", |s| s.height),
            KeyField::float_bits("weight", |s| s.weight),
            KeyField::int("age", |s| s.age),
        ];
    }

    struct Unordered;

    impl ValueType for Unordered {
        const TYPE_NAME: &'static str = "Unordered";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[KeyField::int("id", |_| 0)];
    }

    impl Ordered for Unordered {
        const ORDER: &'static [OrderStep<Self>] = &[];
    }

    fn profile(height: i64, weight: f64, age: i64) -> Profile {
        Profile {
            height,
            weight,
            age,
        }
    }

    #[test]
    fn test_first_difference_wins() {
        assert_eq!(
            compare(&profile(170, 90.0, 20), &profile(180, 50.0, 10)),
            Ordering::Less
        );
        assert_eq!(
            compare(&profile(170, 60.0, 40), &profile(170, 60.5, 10)),
            Ordering::Less
        );
        assert_eq!(
            compare(&profile(170, 60.0, 40), &profile(170, 60.0, 10)),
            Ordering::Greater
        );
        assert_eq!(
            compare(&profile(170, 60.0, 40), &profile(170, 60.0, 40)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_extreme_integers_do_not_overflow() {
        let low = profile(i64::MIN, 0.0, 0);
        let high = profile(i64::MAX, 0.0, 0);
        assert_eq!(compare(&low, &high), Ordering::Less);
        assert_eq!(compare(&high, &low), Ordering::Greater);
    }

    #[test]
    fn test_float_total_order() {
        let nan = profile(0, f64::NAN, 0);
        let inf = profile(0, f64::INFINITY, 0);
        assert_eq!(compare(&nan, &inf), Ordering::Greater);
        assert_eq!(compare(&nan, &nan), Ordering::Equal);
        assert_eq!(
            compare(&profile(0, -0.0, 0), &profile(0, 0.0, 0)),
            Ordering::Less
        );
    }

    #[test]
    fn test_comparator_chain_and_reverse() {
        let by_age = Comparator::comparing(OrderStep::int("age", |p: &Profile| p.age))
            .then(OrderStep::int("height", |p: &Profile| p.height).reversed());

        let mut people = vec![
            profile(160, 50.0, 30),
            profile(180, 70.0, 20),
            profile(175, 65.0, 30),
        ];
        by_age.sort(&mut people);
        assert_eq!(
            people.iter().map(|p| p.height).collect::<Vec<_>>(),
            vec![180, 175, 160]
        );

        by_age.reversed().sort(&mut people);
        assert_eq!(
            people.iter().map(|p| p.height).collect::<Vec<_>>(),
            vec![160, 175, 180]
        );
    }

    #[test]
    fn test_natural_comparator_matches_declared_order() {
        let natural = Comparator::<Profile>::natural();
        let (a, b) = (profile(1, 2.0, 3), profile(1, 2.0, 4));
        assert_eq!(natural.compare(&a, &b), compare(&a, &b));
        assert_eq!(natural.steps().len(), 3);
    }

    #[test]
    fn test_structural_compare_nulls_first() {
        assert_eq!(
            values_compare(FieldValue::Null, FieldValue::Int(i64::MIN)),
            Ordering::Less
        );
        assert_eq!(
            values_compare(FieldValue::Int(1), FieldValue::Null),
            Ordering::Greater
        );
        let a = profile(1, 1.0, 1);
        let b = profile(1, 1.0, 2);
        assert_eq!(structural_compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_structural_compare_separates_domains() {
        let p = profile(1, 1.0, 1);
        let s = Stature {
            height: 1,
            weight: 1.0,
            age: 1,
        };
        assert!(!crate::equality::structural_equals(&p, &s));
        assert_eq!(structural_compare(&p, &s), Ordering::Less);
        assert_eq!(structural_compare(&s, &p), Ordering::Greater);

        let shorter = Stature {
            height: 0,
            weight: 1.0,
            age: 1,
        };
        assert_eq!(structural_compare(&p, &shorter), Ordering::Less);
        assert_eq!(structural_compare(&p, &profile(1, 1.0, 1)), Ordering::Equal);
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order::<Profile>().is_ok());
        assert_eq!(
            validate_order::<Unordered>(),
            Err(SchemaError::EmptyOrder("Unordered"))
        );
    }
}
