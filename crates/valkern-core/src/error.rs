//! Error types for Valkern Core.

use thiserror::Error;

/// Errors surfaced by call-time kernel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input does not match the canonical grammar. No value is produced.
    #[error("malformed input {input:?}: {reason}")]
    MalformedInput { input: String, reason: String },

    /// Pop on an empty stack. The stack is left unchanged.
    #[error("pop from empty container")]
    EmptyContainer,

    /// Two value types with incompatible key-field sets were compared.
    #[error("incomparable types {left} and {right}: {reason}")]
    IncomparableTypes {
        left: &'static str,
        right: &'static str,
        reason: String,
    },

    /// A constructor rejected a field value.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// An operation ran against a declaration that does not hold up.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors detected while checking a declaration at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{0} declares no key fields")]
    EmptySchema(&'static str),

    #[error("{domain} declares key field {field} more than once")]
    DuplicateField {
        domain: &'static str,
        field: &'static str,
    },

    #[error("{0} declares a key field with an empty name")]
    EmptyFieldName(&'static str),

    #[error("{0} declares an empty comparison chain")]
    EmptyOrder(&'static str),

    #[error("canonical template of {domain} does not match its key fields: {reason}")]
    TemplateMismatch {
        domain: &'static str,
        reason: String,
    },

    #[error("invalid canonical template for {domain}: {reason}")]
    InvalidTemplate {
        domain: &'static str,
        reason: String,
    },

    #[error("{0} declares an order inconsistent with equality")]
    OrderInconsistent(&'static str),
}

