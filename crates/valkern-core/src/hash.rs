//! Hash composition over key fields.
//!
//! `acc = acc * 31 + field_hash(field)` for each key field, in the same order
//! equality walks them, with wrapping arithmetic. Equal values therefore
//! always hash alike; unequal values may collide.
//!
//! The exact hash values are not part of any stable interface and may change
//! between releases.

use std::cmp::Ordering;
use std::sync::OnceLock;

use crate::field::{FieldValue, ValueType};

/// Odd prime multiplier used to fold each key field into the accumulator.
pub const HASH_MULTIPLIER: u64 = 31;

/// Hash of a value, consistent with [`crate::equality::equals`].
///
/// Uses the value's [`HashCache`] when it has one.
pub fn hash<T: ValueType>(value: &T) -> u64 {
    match value.hash_cache() {
        Some(cache) => cache.get_or_compute(|| compose(value)),
        None => compose(value),
    }
}

/// Compose the hash of a value without consulting its cache.
pub fn compose<T: ValueType>(value: &T) -> u64 {
    T::KEY_FIELDS.iter().fold(0u64, |acc, field| {
        acc.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(field_hash(field.read(value)))
    })
}

/// Hash contribution of a single field value.
pub fn field_hash(value: FieldValue<'_>) -> u64 {
    match value {
        FieldValue::Int(n) => n as u64,
        // -0.0 == 0.0 under numeric equality, so both must hash alike
        FieldValue::Float(x) if x == 0.0 => 0,
        FieldValue::Float(x) => x.to_bits(),
        FieldValue::FloatBits(x) => x.to_bits(),
        FieldValue::Nested(inner) => inner.key_hash(),
        FieldValue::Null => 0,
    }
}

/// Order two values by their hashes.
///
/// Compares with `Ord`; hash subtraction overflows and breaks transitivity.
pub fn hash_order<T: ValueType>(a: &T, b: &T) -> Ordering {
    hash(a).cmp(&hash(b))
}

/// Write-once memoization cell for a composed hash.
///
/// The first caller computes and stores the hash; later callers read it.
/// Concurrent first callers are serialized by the cell. Only sound on
/// immutable values. A clone carries the computed hash along.
#[derive(Debug, Clone, Default)]
pub struct HashCache(OnceLock<u64>);

impl HashCache {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// The cached hash, if it has been computed.
    pub fn get(&self) -> Option<u64> {
        self.0.get().copied()
    }

    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        *self.0.get_or_init(compute)
    }
}
