//! # Valkern
//!
//! The unified API for Valkern - value-semantics contracts for immutable
//! domain types.
//!
//! ## Overview
//!
//! A value type declares its key fields once. From that single declaration
//! the kernel derives:
//!
//! - **Equality**: reflexive, symmetric, transitive, consistent, null-safe
//! - **Hashing**: `acc = 31 * acc + field_hash`, optionally cached
//! - **Ordering**: declarative comparator chains, floats by total order
//! - **Canonical form**: fixed-width positional strings such as `DDD-DDD-DDDD`
//!
//! plus a growable stack that releases popped elements.
//!
//! The [`Kernel`] checks declarations at registration time so that the
//! per-call contracts never fail on a sound declaration.
//!
//! ## Usage
//!
//! ```rust
//! use valkern::{Kernel, KernelConfig};
//! use valkern::core::PhoneNumber;
//!
//! let mut kernel = Kernel::new(KernelConfig::default());
//! kernel.register::<PhoneNumber>().unwrap();
//! kernel.register_order::<PhoneNumber>().unwrap();
//! kernel.register_canonical::<PhoneNumber>().unwrap();
//!
//! let jenny: PhoneNumber = "707-867-5307".parse().unwrap();
//! assert_eq!(valkern::core::hash(&jenny), 711_611);
//!
//! let mut stack = kernel.new_stack();
//! stack.push(jenny);
//! assert!(stack.pop().is_ok());
//! ```
//!
//! ## Re-exports
//!
//! - `valkern::core` - Contracts, codecs and the stack

pub mod error;
pub mod kernel;

// Re-export component crates
pub use valkern_core as core;

// Re-export main types for convenience
pub use error::{KernelError, Result};
pub use kernel::{DomainInfo, Kernel, KernelConfig, Registration};

// Re-export commonly used core types
pub use valkern_core::{
    compare, equals, format, hash, parse, try_format, CanonicalForm, CoreError, CrossDomain,
    KeyField, OrderStep, Ordered, PhoneNumber, SchemaError, Stack, ValueType,
};
