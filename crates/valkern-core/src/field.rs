//! Key fields: the single declaration shared by equality, hashing and the
//! canonical codec.
//!
//! A value type lists its key fields once, as an associated constant. Every
//! other component reads that same list, so the field set used for equality
//! can never drift from the one used for hashing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::SchemaError;
use crate::hash::HashCache;

/// Semantic type of a key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Signed integer, compared with `==`.
    Int,
    /// Floating point with numeric equality: NaN is never equal, `-0.0 == 0.0`.
    Float,
    /// Floating point compared by bit pattern.
    FloatBits,
    /// Another value type, compared recursively.
    Nested,
    /// A value type that may be absent.
    Nullable,
}

/// A key field value read from an instance.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Int(i64),
    Float(f64),
    FloatBits(f64),
    Nested(&'a dyn Structural),
    Null,
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "Int({})", v),
            FieldValue::Float(v) => write!(f, "Float({})", v),
            FieldValue::FloatBits(v) => write!(f, "FloatBits({:#018x})", v.to_bits()),
            FieldValue::Nested(v) => write!(f, "Nested({})", v.type_name()),
            FieldValue::Null => write!(f, "Null"),
        }
    }
}

/// Reads one key field out of a `T`.
pub enum Accessor<T: 'static> {
    Int(fn(&T) -> i64),
    Float(fn(&T) -> f64),
    FloatBits(fn(&T) -> f64),
    Nested(fn(&T) -> &dyn Structural),
    Nullable(fn(&T) -> Option<&dyn Structural>),
}

impl<T: 'static> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Accessor<T> {}

/// A declared `(name, kind, accessor)` key field of a value type.
///
/// Nested and nullable fields also record the comparison domain of the
/// value they hold.
pub struct KeyField<T: 'static> {
    name: &'static str,
    domain: Option<&'static str>,
    accessor: Accessor<T>,
}

impl<T: 'static> Clone for KeyField<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for KeyField<T> {}

impl<T: 'static> KeyField<T> {
    /// A signed integer field.
    pub const fn int(name: &'static str, get: fn(&T) -> i64) -> Self {
        Self {
            name,
            domain: None,
            accessor: Accessor::Int(get),
        }
    }

    /// A floating-point field with numeric equality.
    ///
    /// NaN compares unequal to everything, including itself, and the two
    /// zeroes compare equal. Use [`KeyField::float_bits`] when NaN must be
    /// equal to itself.
    pub const fn float(name: &'static str, get: fn(&T) -> f64) -> Self {
        Self {
            name,
            domain: None,
            accessor: Accessor::Float(get),
        }
    }

    /// A floating-point field compared by bit pattern.
    pub const fn float_bits(name: &'static str, get: fn(&T) -> f64) -> Self {
        Self {
            name,
            domain: None,
            accessor: Accessor::FloatBits(get),
        }
    }

    /// A field holding another value type `N`.
    ///
    /// ```
    /// # use valkern_core::{KeyField, ValueType};
    /// # struct Point { x: i64 }
    /// # impl ValueType for Point {
    /// #     const TYPE_NAME: &'static str = "Point";
    /// #     const KEY_FIELDS: &'static [KeyField<Self>] = &[KeyField::int("x", |p| p.x)];
    /// # }
    /// struct Pin { at: Point }
    ///
    /// impl ValueType for Pin {
    ///     const TYPE_NAME: &'static str = "Pin";
    ///     const KEY_FIELDS: &'static [KeyField<Self>] =
    ///         &[KeyField::nested::<Point>("at", |p| &p.at)];
    /// }
    /// ```
    pub const fn nested<N: ValueType>(name: &'static str, get: fn(&T) -> &dyn Structural) -> Self {
        Self {
            name,
            domain: Some(N::TYPE_NAME),
            accessor: Accessor::Nested(get),
        }
    }

    /// A field holding a value type `N` that may be absent.
    pub const fn nullable<N: ValueType>(
        name: &'static str,
        get: fn(&T) -> Option<&dyn Structural>,
    ) -> Self {
        Self {
            name,
            domain: Some(N::TYPE_NAME),
            accessor: Accessor::Nullable(get),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Domain of the value a nested or nullable field holds.
    pub const fn domain(&self) -> Option<&'static str> {
        self.domain
    }

    pub const fn kind(&self) -> FieldKind {
        match self.accessor {
            Accessor::Int(_) => FieldKind::Int,
            Accessor::Float(_) => FieldKind::Float,
            Accessor::FloatBits(_) => FieldKind::FloatBits,
            Accessor::Nested(_) => FieldKind::Nested,
            Accessor::Nullable(_) => FieldKind::Nullable,
        }
    }

    /// Read this field from an instance.
    pub fn read<'a>(&self, value: &'a T) -> FieldValue<'a> {
        let nested = |inner: &'a dyn Structural| {
            debug_assert_eq!(
                Some(inner.type_name()),
                self.domain,
                "key field `{}` holds a different domain than declared",
                self.name
            );
            FieldValue::Nested(inner)
        };
        match self.accessor {
            Accessor::Int(get) => FieldValue::Int(get(value)),
            Accessor::Float(get) => FieldValue::Float(get(value)),
            Accessor::FloatBits(get) => FieldValue::FloatBits(get(value)),
            Accessor::Nested(get) => nested(get(value)),
            Accessor::Nullable(get) => get(value).map_or(FieldValue::Null, nested),
        }
    }

    pub fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name.to_string(),
            kind: self.kind(),
            domain: self.domain.map(str::to_string),
        }
    }
}

impl<T: 'static> fmt::Debug for KeyField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyField")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("domain", &self.domain)
            .finish()
    }
}

/// Serializable projection of a key field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Domain held by a nested or nullable field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// An immutable type whose equality, hash and codec derive from its key fields.
///
/// Implementors must not allow any key field to change after construction.
/// Enabling [`ValueType::hash_cache`] on a type with mutable key fields is a
/// correctness hazard and is not supported.
pub trait ValueType: Sized + 'static {
    /// Comparison-domain tag.
    const TYPE_NAME: &'static str;

    /// Key fields in declaration order.
    const KEY_FIELDS: &'static [KeyField<Self>];

    /// Write-once cell holding this instance's composed hash, if the type
    /// opts into caching.
    fn hash_cache(&self) -> Option<&HashCache> {
        None
    }
}

/// Object-safe view of a value type, used for nested fields.
pub trait Structural {
    fn type_name(&self) -> &'static str;

    fn key_count(&self) -> usize;

    /// Key field at `index`, or `Null` when out of range.
    fn key_value(&self, index: usize) -> FieldValue<'_>;

    fn key_hash(&self) -> u64;
}

impl<T: ValueType> Structural for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn key_count(&self) -> usize {
        T::KEY_FIELDS.len()
    }

    fn key_value(&self, index: usize) -> FieldValue<'_> {
        T::KEY_FIELDS
            .get(index)
            .map_or(FieldValue::Null, |field| field.read(self))
    }

    fn key_hash(&self) -> u64 {
        crate::hash::hash(self)
    }
}

/// Descriptors of `T`'s key fields, in declaration order.
pub fn descriptors<T: ValueType>() -> Vec<FieldDescriptor> {
    T::KEY_FIELDS.iter().map(KeyField::descriptor).collect()
}

/// Check a key-field declaration.
///
/// Rejects empty declarations, empty names and duplicate names.
pub fn validate_schema<T: ValueType>() -> Result<(), SchemaError> {
    if T::KEY_FIELDS.is_empty() {
        return Err(SchemaError::EmptySchema(T::TYPE_NAME));
    }

    let mut seen = BTreeSet::new();
    for field in T::KEY_FIELDS {
        if field.name().is_empty() {
            return Err(SchemaError::EmptyFieldName(T::TYPE_NAME));
        }
        if !seen.insert(field.name()) {
            return Err(SchemaError::DuplicateField {
                domain: T::TYPE_NAME,
                field: field.name(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reading {
        sensor: i64,
        value: f64,
    }

    impl ValueType for Reading {
        const TYPE_NAME: &'static str = "Reading";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::int("sensor", |r| r.sensor),
            KeyField::float("value", |r| r.value),
        ];
    }

    struct Tagged {
        reading: Reading,
        parent: Option<Reading>,
    }

    impl ValueType for Tagged {
        const TYPE_NAME: &'static str = "Tagged";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[
            KeyField::nested::<Reading>("reading", |t| &t.reading),
            KeyField::nullable::<Reading>("parent", |t| {
                t.parent.as_ref().map(|p| p as &dyn Structural)
            }),
        ];
    }

    struct Twice;

    impl ValueType for Twice {
        const TYPE_NAME: &'static str = "Twice";
        const KEY_FIELDS: &'static [KeyField<Self>] =
            &[KeyField::int("a", |_| 1), KeyField::int("a", |_| 2)];
    }

    struct Nothing;

    impl ValueType for Nothing {
        const TYPE_NAME: &'static str = "Nothing";
        const KEY_FIELDS: &'static [KeyField<Self>] = &[];
    }

    #[test]
    fn test_kinds_follow_declaration() {
        let kinds: Vec<_> = Tagged::KEY_FIELDS.iter().map(KeyField::kind).collect();
        assert_eq!(kinds, vec![FieldKind::Nested, FieldKind::Nullable]);
    }

    #[test]
    fn test_read_nullable() {
        let t = Tagged {
            reading: Reading { sensor: 1, value: 0.5 },
            parent: None,
        };
        assert!(matches!(Tagged::KEY_FIELDS[1].read(&t), FieldValue::Null));
        assert!(matches!(Tagged::KEY_FIELDS[0].read(&t), FieldValue::Nested(_)));
    }

    #[test]
    fn test_structural_view() {
        let r = Reading { sensor: 7, value: 1.5 };
        let view: &dyn Structural = &r;
        assert_eq!(view.type_name(), "Reading");
        assert_eq!(view.key_count(), 2);
        assert!(matches!(view.key_value(0), FieldValue::Int(7)));
        assert!(matches!(view.key_value(9), FieldValue::Null));
    }

    #[test]
    fn test_validate_schema() {
        assert!(validate_schema::<Reading>().is_ok());
        assert_eq!(
            validate_schema::<Twice>(),
            Err(SchemaError::DuplicateField {
                domain: "Twice",
                field: "a"
            })
        );
        assert_eq!(
            validate_schema::<Nothing>(),
            Err(SchemaError::EmptySchema("Nothing"))
        );
    }

    #[test]
    fn test_descriptor_serializes() {
        let json = serde_json::to_string(&descriptors::<Reading>()).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"sensor","kind":"Int"},{"name":"value","kind":"Float"}]"#
        );
    }

    #[test]
    fn test_nested_descriptor_names_its_domain() {
        let tagged = descriptors::<Tagged>();
        assert_eq!(tagged[0].domain.as_deref(), Some("Reading"));
        assert_eq!(tagged[1].domain.as_deref(), Some("Reading"));
        assert_eq!(Reading::KEY_FIELDS[0].domain(), None);

        let json = serde_json::to_string(&tagged[0]).unwrap();
        assert_eq!(json, r#"{"name":"reading","kind":"Nested","domain":"Reading"}"#);
        let back: FieldDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tagged[0]);
    }
}
