//! Error types for the Kernel.

use thiserror::Error;
use valkern_core::{CoreError, SchemaError};

/// Errors that can occur during Kernel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Call-time contract error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Declaration rejected at registration.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Value type already registered.
    #[error("value type already registered: {0}")]
    AlreadyRegistered(&'static str),

    /// Value type not registered.
    #[error("value type not registered: {0}")]
    NotRegistered(&'static str),

    /// Two distinct Rust types claim the same comparison-domain name.
    #[error("domain name {0} is claimed by two different types")]
    DomainConflict(&'static str),
}

/// Result type for Kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
