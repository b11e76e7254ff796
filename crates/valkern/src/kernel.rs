//! The Kernel: registration-time checks for value types.
//!
//! Every contract in `valkern_core` is infallible per call once a
//! declaration is known to be sound. The Kernel is where declarations are
//! checked: key-field schemas, comparison chains, canonical templates and
//! cross-type comparability all fail here, once, instead of on every
//! comparison.

use std::any::TypeId;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use valkern_core::{
    descriptors, validate_order, validate_schema, validate_template, CanonicalForm, CrossDomain,
    FieldDescriptor, OrderConsistency, Ordered, SchemaError, Stack, ValueType,
};

use crate::error::{KernelError, Result};

/// Configuration for the Kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Reject orders declared inconsistent with equality.
    pub require_order_consistency: bool,
    /// Initial capacity of stacks created by [`Kernel::new_stack`].
    pub stack_capacity: usize,
    /// Treat a repeated registration of the same type as a no-op instead of
    /// an error.
    pub allow_reregistration: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            require_order_consistency: false,
            stack_capacity: valkern_core::DEFAULT_CAPACITY,
            allow_reregistration: false,
        }
    }
}

/// What the Kernel knows about a registered value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Comparison-domain name.
    pub name: String,
    /// Key fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Declared order consistency, if the type registered an order.
    pub order: Option<OrderConsistency>,
    /// Canonical grammar such as `DDD-DDD-DDDD`, if the type registered one.
    pub canonical: Option<String>,
}

/// Result of registering a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The declaration was checked and recorded.
    Registered,
    /// The type was already registered; nothing changed.
    AlreadyPresent,
}

struct Entry {
    type_id: TypeId,
    info: DomainInfo,
}

/// The main Kernel struct.
///
/// Holds the set of value types whose declarations passed registration,
/// keyed by comparison-domain name.
pub struct Kernel {
    config: KernelConfig,
    domains: BTreeMap<&'static str, Entry>,
}

impl Kernel {
    /// Create a new kernel instance.
    pub fn new(config: KernelConfig) -> Self {
        Self {
            config,
            domains: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a value type's key-field declaration.
    pub fn register<T: ValueType>(&mut self) -> Result<Registration> {
        let name = T::TYPE_NAME;

        if let Some(entry) = self.domains.get(name) {
            if entry.type_id != TypeId::of::<T>() {
                return Err(rejected(name, KernelError::DomainConflict(name)));
            }
            if !self.config.allow_reregistration {
                return Err(rejected(name, KernelError::AlreadyRegistered(name)));
            }
            tracing::debug!(domain = name, "value type already registered");
            return Ok(Registration::AlreadyPresent);
        }

        validate_schema::<T>().map_err(|e| rejected(name, e.into()))?;

        let info = DomainInfo {
            name: name.to_string(),
            fields: descriptors::<T>(),
            order: None,
            canonical: None,
        };
        tracing::debug!(domain = name, fields = info.fields.len(), "registered value type");
        self.domains.insert(
            name,
            Entry {
                type_id: TypeId::of::<T>(),
                info,
            },
        );
        Ok(Registration::Registered)
    }

    /// Register a type's comparison chain.
    ///
    /// The type must already be registered. With
    /// `require_order_consistency`, orders declared inconsistent with
    /// equality are rejected.
    pub fn register_order<T: Ordered>(&mut self) -> Result<()> {
        let name = T::TYPE_NAME;
        let require_consistency = self.config.require_order_consistency;
        let entry = self.entry_mut::<T>()?;

        validate_order::<T>().map_err(|e| rejected(name, e.into()))?;

        if T::CONSISTENCY == OrderConsistency::InconsistentWithEquals {
            if require_consistency {
                return Err(rejected(name, SchemaError::OrderInconsistent(name).into()));
            }
            tracing::warn!(
                domain = name,
                "order is inconsistent with equality; sorted and hashed collections may disagree"
            );
        }

        entry.info.order = Some(T::CONSISTENCY);
        tracing::debug!(domain = name, steps = T::ORDER.len(), "registered order");
        Ok(())
    }

    /// Register a type's canonical string form.
    ///
    /// The type must already be registered.
    pub fn register_canonical<T: CanonicalForm>(&mut self) -> Result<()> {
        let name = T::TYPE_NAME;
        let entry = self.entry_mut::<T>()?;

        validate_template::<T>().map_err(|e| rejected(name, e.into()))?;

        let pattern = T::TEMPLATE.pattern();
        tracing::debug!(domain = name, pattern = %pattern, "registered canonical form");
        entry.info.canonical = Some(pattern);
        Ok(())
    }

    /// Declare two registered types comparable and issue the token that
    /// compares them.
    ///
    /// Fails with `IncomparableTypes` when either type adds or changes key
    /// fields relative to the other. The answer does not depend on argument
    /// order.
    pub fn declare_comparable<A: ValueType, B: ValueType>(&self) -> Result<CrossDomain<A, B>> {
        self.entry::<A>()?;
        self.entry::<B>()?;

        let token = CrossDomain::<A, B>::new().map_err(|e| rejected(A::TYPE_NAME, e.into()))?;
        tracing::debug!(
            left = A::TYPE_NAME,
            right = B::TYPE_NAME,
            "declared comparable domains"
        );
        Ok(token)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a registered domain by name.
    pub fn domain(&self, name: &str) -> Option<&DomainInfo> {
        self.domains.get(name).map(|entry| &entry.info)
    }

    /// Whether `T` itself is registered. A query, so it never logs.
    pub fn is_registered<T: ValueType>(&self) -> bool {
        self.domains
            .get(T::TYPE_NAME)
            .is_some_and(|entry| entry.type_id == TypeId::of::<T>())
    }

    /// All registered domains, ordered by name.
    pub fn domains(&self) -> impl Iterator<Item = &DomainInfo> + '_ {
        self.domains.values().map(|entry| &entry.info)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Containers
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an empty stack with the configured initial capacity.
    pub fn new_stack<E>(&self) -> Stack<E> {
        Stack::with_capacity(self.config.stack_capacity)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    fn entry<T: ValueType>(&self) -> Result<&Entry> {
        match self.domains.get(T::TYPE_NAME) {
            Some(entry) if entry.type_id == TypeId::of::<T>() => Ok(entry),
            Some(_) => Err(rejected(
                T::TYPE_NAME,
                KernelError::DomainConflict(T::TYPE_NAME),
            )),
            None => Err(rejected(T::TYPE_NAME, KernelError::NotRegistered(T::TYPE_NAME))),
        }
    }

    fn entry_mut<T: ValueType>(&mut self) -> Result<&mut Entry> {
        match self.domains.get_mut(T::TYPE_NAME) {
            Some(entry) if entry.type_id == TypeId::of::<T>() => Ok(entry),
            Some(_) => Err(rejected(
                T::TYPE_NAME,
                KernelError::DomainConflict(T::TYPE_NAME),
            )),
            None => Err(rejected(T::TYPE_NAME, KernelError::NotRegistered(T::TYPE_NAME))),
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

fn rejected(domain: &'static str, err: KernelError) -> KernelError {
    tracing::warn!(domain, error = %err, "declaration rejected");
    err
}
