//! Structural equality over key fields.
//!
//! Equality is reflexive, symmetric, transitive, consistent, and never true
//! against an absent value. It is total: it never fails or panics.
//!
//! Two distinct value types can only be compared through a [`CrossDomain`]
//! token. The token exists only when both declare exactly the same key
//! fields; a type that adds a field to another cannot be compared with it
//! transitively, so such pairs are rejected up front. Hold the other type as
//! a nested field instead.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::error::CoreError;
use crate::field::{descriptors, FieldDescriptor, FieldValue, Structural, ValueType};
use crate::ordering::values_compare;

/// Structural equality of two instances of the same value type.
pub fn equals<T: ValueType>(a: &T, b: &T) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    T::KEY_FIELDS
        .iter()
        .all(|field| values_equal(field.read(a), field.read(b)))
}

/// Equality against a possibly absent value. `None` is never equal.
pub fn equals_nullable<T: ValueType>(a: &T, b: Option<&T>) -> bool {
    b.is_some_and(|b| equals(a, b))
}

/// Equality of two type-erased values.
///
/// Values of different comparison domains are never equal.
pub fn structural_equals(a: &dyn Structural, b: &dyn Structural) -> bool {
    if a.type_name() != b.type_name() || a.key_count() != b.key_count() {
        return false;
    }
    (0..a.key_count()).all(|i| values_equal(a.key_value(i), b.key_value(i)))
}

/// Equality of two field values.
pub fn values_equal(a: FieldValue<'_>, b: FieldValue<'_>) -> bool {
    match (a, b) {
        (FieldValue::Int(x), FieldValue::Int(y)) => x == y,
        (FieldValue::Float(x), FieldValue::Float(y)) => x == y,
        (FieldValue::FloatBits(x), FieldValue::FloatBits(y)) => x.to_bits() == y.to_bits(),
        (FieldValue::Nested(x), FieldValue::Nested(y)) => structural_equals(x, y),
        (FieldValue::Null, FieldValue::Null) => true,
        _ => false,
    }
}

/// One-directional equality against a foreign representation of a value,
/// such as its raw string form.
///
/// This is deliberately not symmetric: the foreign type knows nothing about
/// the value type, and no reverse comparison is defined. Do not use it where
/// `equals` semantics are required.
pub trait ForeignRepresentation<F: ?Sized> {
    fn equals_ignoring_foreign_representation(&self, foreign: &F) -> bool;
}

/// Proof that two value types declare identical key fields, and so can be
/// compared with each other without breaking symmetry or transitivity.
pub struct CrossDomain<A, B> {
    _domains: PhantomData<fn(&A, &B)>,
}

impl<A: ValueType, B: ValueType> CrossDomain<A, B> {
    /// Check the two declarations and issue the token.
    ///
    /// Fails with `IncomparableTypes` unless both types declare the same
    /// key-field names and kinds in the same order, with nested fields
    /// holding the same domains. The check is symmetric.
    pub fn new() -> Result<Self, CoreError> {
        let left = descriptors::<A>();
        let right = descriptors::<B>();
        if left == right {
            return Ok(Self {
                _domains: PhantomData,
            });
        }
        Err(CoreError::IncomparableTypes {
            left: A::TYPE_NAME,
            right: B::TYPE_NAME,
            reason: mismatch_reason(&left, &right),
        })
    }

    pub fn equals(&self, a: &A, b: &B) -> bool {
        A::KEY_FIELDS
            .iter()
            .zip(B::KEY_FIELDS)
            .all(|(fa, fb)| values_equal(fa.read(a), fb.read(b)))
    }

    pub fn compare(&self, a: &A, b: &B) -> Ordering {
        A::KEY_FIELDS
            .iter()
            .zip(B::KEY_FIELDS)
            .map(|(fa, fb)| values_compare(fa.read(a), fb.read(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// The same token with the operands swapped.
    pub fn reverse(&self) -> CrossDomain<B, A> {
        CrossDomain {
            _domains: PhantomData,
        }
    }
}

impl<A, B> Clone for CrossDomain<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for CrossDomain<A, B> {}

impl<A: ValueType, B: ValueType> fmt::Debug for CrossDomain<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CrossDomain({}, {})", A::TYPE_NAME, B::TYPE_NAME)
    }
}

fn mismatch_reason(left: &[FieldDescriptor], right: &[FieldDescriptor]) -> String {
    let names = |fields: &[FieldDescriptor]| -> Vec<String> {
        fields.iter().map(|f| f.name.clone()).collect()
    };
    let (ln, rn) = (names(left), names(right));
    let extra = |of: &[String], over: &[String]| -> Vec<String> {
        of.iter().filter(|n| !over.contains(*n)).cloned().collect()
    };
    let (left_extra, right_extra) = (extra(&ln, &rn), extra(&rn, &ln));

    match (left_extra.is_empty(), right_extra.is_empty()) {
        (false, true) => format!("left adds key fields {:?}", left_extra),
        (true, false) => format!("right adds key fields {:?}", right_extra),
        (false, false) => format!(
            "key fields differ: left has {:?}, right has {:?}",
            left_extra, right_extra
        ),
        (true, true) if ln != rn => "key fields declared in a different order".to_string(),
        (true, true) => match left.iter().zip(right).find(|(l, r)| l.kind != r.kind) {
            Some((l, r)) => format!(
                "key field `{}` is {:?} on the left, {:?} on the right",
                l.name, l.kind, r.kind
            ),
            None => nested_domain_reason(left, right),
        },
    }
}

fn nested_domain_reason(left: &[FieldDescriptor], right: &[FieldDescriptor]) -> String {
    match left.iter().zip(right).find(|(l, r)| l.domain != r.domain) {
        Some((l, r)) => format!(
            "nested key field `{}` holds {} on the left, {} on the right",
            l.name,
            l.domain.as_deref().unwrap_or("nothing"),
            r.domain.as_deref().unwrap_or("nothing")
        ),
        None => "key fields differ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::KeyField;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl ValueType for Point {
        const TYPE_NAME: &'static str = "Point";
        const KEY_FIELDS: &'static [KeyField<Self>] =
            &[KeyField::int("x", |p| p.x), KeyField::int("y", |p| p.y)];
    }

    struct PlanePoint {
        x: i64,
        y: i64,
    }

    impl ValueType for PlanePoint {
        const TYPE_NAME: &'static str = "PlanePoint";
        const KEY_FIELDS: &'static [KeyField<Self>] =
            &[KeyField::int("x", |p| p.x), KeyField::int("y", |p| p.y)];
    }

    struct ColorPoint {
        x: i64,
        y: i64,
        color: i64,
    }

    impl ValueType for ColorPoint {
        const TYPE_NAME: &'static str = "ColorPoint";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::int("x", |p| p.x),
            KeyField::int("y", |p| p.y),
            KeyField::int("color", |p| p.color),
        ];
    }

    struct Sample {
        value: f64,
        exact: f64,
    }

    impl ValueType for Sample {
        const TYPE_NAME: &'static str = "Sample";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::float("value", |s| s.value),
            KeyField::float_bits("exact", |s| s.exact),
        ];
    }

    struct Segment {
        start: Point,
        end: Option<Point>,
    }

    impl ValueType for Segment {
        const TYPE_NAME: &'static str = "Segment";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::nested::<Point>("start", |s| &s.start),
            KeyField::nullable::<Point>("end", |s| s.end.as_ref().map(|p| p as &dyn Structural)),
        ];
    }

    fn point(x: i64, y: i64) -> Point {
        Point { x, y }
    }

    fn sample(value: f64, exact: f64) -> Sample {
        Sample { value, exact }
    }

    #[test]
    fn test_reflexive_and_symmetric() {
        let a = point(1, 2);
        let b = point(1, 2);
        assert!(equals(&a, &a));
        assert!(equals(&a, &b));
        assert!(equals(&b, &a));
        assert!(!equals(&a, &point(2, 1)));
    }

    #[test]
    fn test_transitive() {
        let (a, b, c) = (point(3, 4), point(3, 4), point(3, 4));
        assert!(equals(&a, &b) && equals(&b, &c) && equals(&a, &c));
    }

    #[test]
    fn test_never_equal_to_absent() {
        assert!(!equals_nullable(&point(0, 0), None));
        assert!(equals_nullable(&point(0, 0), Some(&point(0, 0))));
    }

    #[test]
    fn test_numeric_float_equality() {
        assert!(equals(&sample(0.0, 1.0), &sample(-0.0, 1.0)));
        assert!(!equals(&sample(f64::NAN, 1.0), &sample(f64::NAN, 1.0)));
    }

    #[test]
    fn test_bitwise_float_equality() {
        assert!(equals(&sample(1.0, f64::NAN), &sample(1.0, f64::NAN)));
        assert!(!equals(&sample(1.0, 0.0), &sample(1.0, -0.0)));
    }

    #[test]
    fn test_same_instance_is_equal_even_with_nan() {
        let s = sample(f64::NAN, 0.0);
        assert!(equals(&s, &s));
    }

    #[test]
    fn test_nested_and_nullable() {
        let a = Segment {
            start: point(0, 0),
            end: Some(point(1, 1)),
        };
        let b = Segment {
            start: point(0, 0),
            end: Some(point(1, 1)),
        };
        let open = Segment {
            start: point(0, 0),
            end: None,
        };
        assert!(equals(&a, &b));
        assert!(!equals(&a, &open));
        assert!(!equals(&open, &a));
        assert!(equals(
            &open,
            &Segment {
                start: point(0, 0),
                end: None
            }
        ));
    }

    #[test]
    fn test_structural_equals_checks_domain() {
        let p = point(1, 2);
        let q = PlanePoint { x: 1, y: 2 };
        assert!(!structural_equals(&p, &q));
        assert!(structural_equals(&p, &point(1, 2)));
    }

    #[test]
    fn test_cross_domain_with_identical_fields() {
        let token = CrossDomain::<Point, PlanePoint>::new().unwrap();
        let p = point(5, 6);
        let q = PlanePoint { x: 5, y: 6 };
        assert!(token.equals(&p, &q));
        assert!(token.reverse().equals(&q, &p));
        assert_eq!(token.compare(&p, &q), Ordering::Equal);
        assert_eq!(token.compare(&point(4, 9), &q), Ordering::Less);
    }

    #[test]
    fn test_cross_domain_rejects_superset_both_ways() {
        let forward = CrossDomain::<Point, ColorPoint>::new().unwrap_err();
        let backward = CrossDomain::<ColorPoint, Point>::new().unwrap_err();

        match forward {
            CoreError::IncomparableTypes { left, right, reason } => {
                assert_eq!((left, right), ("Point", "ColorPoint"));
                assert!(reason.contains("right adds"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        match backward {
            CoreError::IncomparableTypes { reason, .. } => assert!(reason.contains("left adds")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    struct Pin {
        at: Point,
    }

    impl ValueType for Pin {
        const TYPE_NAME: &'static str = "Pin";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[KeyField::nested::<Point>("at", |p| &p.at)];
    }

    struct ColorPin {
        at: ColorPoint,
    }

    impl ValueType for ColorPin {
        const TYPE_NAME: &'static str = "ColorPin";
        const KEY_FIELDS: &'static [KeyField<Self>] =
            &[KeyField::nested::<ColorPoint>("at", |p| &p.at)];
    }

    struct PlanePin {
        at: PlanePoint,
    }

    impl ValueType for PlanePin {
        const TYPE_NAME: &'static str = "PlanePin";
        const KEY_FIELDS: &'static [KeyField<Self>] =
            &[KeyField::nested::<PlanePoint>("at", |p| &p.at)];
    }

    #[test]
    fn test_cross_domain_rejects_nested_superset_both_ways() {
        for err in [
            CrossDomain::<Pin, ColorPin>::new().map(|_| ()).unwrap_err(),
            CrossDomain::<ColorPin, Pin>::new().map(|_| ()).unwrap_err(),
        ] {
            match err {
                CoreError::IncomparableTypes { reason, .. } => {
                    assert!(reason.contains("nested key field `at`"), "{reason}");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_cross_domain_rejects_nested_foreign_domain() {
        // Point and PlanePoint share key fields, but their values are never
        // structurally equal, so wrappers of them cannot be compared either.
        assert!(CrossDomain::<Pin, PlanePin>::new().is_err());
        assert!(CrossDomain::<PlanePin, Pin>::new().is_err());

        let pin = Pin { at: point(1, 2) };
        let plane = PlanePin {
            at: PlanePoint { x: 1, y: 2 },
        };
        assert!(!structural_equals(&pin, &plane));
        assert!(CrossDomain::<Pin, Pin>::new().unwrap().equals(&pin, &Pin { at: point(1, 2) }));
    }

    #[test]
    fn test_cross_domain_rejects_disjoint_fields() {
        let err = CrossDomain::<Point, Segment>::new().unwrap_err();
        assert!(matches!(err, CoreError::IncomparableTypes { .. }));
    }
}
