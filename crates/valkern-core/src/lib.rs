//! # Valkern Core
//!
//! Value-semantics contracts for immutable domain types: structural
//! equality, hashing, ordering and a canonical string codec, all derived from
//! one key-field declaration per type. Also home to a growable stack that
//! releases popped elements.
//!
//! This crate contains no I/O and no global state.
//!
//! ## Key Types
//!
//! - [`ValueType`] - A type declaring its key fields once
//! - [`KeyField`] - One `(name, kind, accessor)` key field
//! - [`Ordered`] - A value type with a declared comparison chain
//! - [`CanonicalForm`] - A value type with a canonical string form
//! - [`CrossDomain`] - Proof that two value types are comparable
//! - [`Stack`] - LIFO container with explicit release on pop
//!
//! ## Declaring a value type
//!
//! ```rust
//! use valkern_core::{equals, hash, KeyField, ValueType};
//!
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl ValueType for Point {
//!     const TYPE_NAME: &'static str = "Point";
//!     const KEY_FIELDS: &'static [KeyField<Self>] =
//!         &[KeyField::int("x", |p| p.x), KeyField::int("y", |p| p.y)];
//! }
//!
//! let (a, b) = (Point { x: 1, y: 2 }, Point { x: 1, y: 2 });
//! assert!(equals(&a, &b));
//! assert_eq!(hash(&a), hash(&b));
//! ```

pub mod canonical;
pub mod equality;
pub mod error;
pub mod field;
pub mod hash;
pub mod ordering;
pub mod phone;
pub mod stack;
pub mod types;

pub use canonical::{format, parse, try_format, validate_template, CanonicalForm, Template};
pub use equality::{equals, equals_nullable, structural_equals, CrossDomain, ForeignRepresentation};
pub use error::{CoreError, SchemaError};
pub use field::{
    descriptors, validate_schema, FieldDescriptor, FieldKind, FieldValue, KeyField, Structural,
    ValueType,
};
pub use hash::{hash, hash_order, HashCache, HASH_MULTIPLIER};
pub use ordering::{
    compare, structural_compare, validate_order, Comparator, OrderConsistency, OrderStep, Ordered,
};
pub use phone::PhoneNumber;
pub use stack::{Stack, DEFAULT_CAPACITY};
pub use types::Keyed;
