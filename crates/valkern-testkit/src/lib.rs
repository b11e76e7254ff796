//! # Valkern Testkit
//!
//! Testing utilities for Valkern.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Phone numbers with their expected canonical strings and hashes
//! - **Generators**: Proptest strategies for property-based testing of the contract laws
//! - **Fixtures**: Sample value types covering every key-field kind, and a registered kernel
//!
//! ## Golden Vectors
//!
//! ```rust
//! use valkern_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, detail) in verify_all_vectors() {
//!     assert!(ok, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use valkern_testkit::generators::PhoneParams;
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: PhoneParams) {
//!         let a = params.build();
//!         let b = params.build();
//!         prop_assert_eq!(valkern::hash(&a), valkern::hash(&b));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use valkern_testkit::fixtures::registered_kernel;
//!
//! let kernel = registered_kernel();
//! assert!(kernel.domain("Point").is_some());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{registered_kernel, Amount, ColorPoint, Labelled, PlanePoint, Point, Profile, Reading};
pub use generators::{phone_from_params, PhoneParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
