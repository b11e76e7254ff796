//! A growable LIFO stack that releases popped elements.
//!
//! The stack owns a fixed run of slots and a live count. Capacity only ever
//! grows (to `2 * capacity + 1` when full). Popping empties the slot it reads
//! from, so the stack never holds an element it no longer logically
//! contains: an element's lifetime ends with its logical removal, not when
//! the backing storage is reused or dropped.
//!
//! The stack is single-owner. Mutation requires `&mut self`; callers that
//! need shared access wrap it in a lock.

use std::fmt;

use crate::error::CoreError;

/// Capacity of a stack created with [`Stack::new`].
pub const DEFAULT_CAPACITY: usize = 16;

pub struct Stack<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            len: 0,
        }
    }

    /// Push a value, growing the slot array when full.
    ///
    /// # Panics
    ///
    /// If the grown capacity overflows `usize`. Allocation failure aborts.
    pub fn push(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Remove and return the top value, clearing its slot.
    ///
    /// Fails with `EmptyContainer` when empty, leaving the stack unchanged.
    pub fn pop(&mut self) -> Result<T, CoreError> {
        if self.len == 0 {
            return Err(CoreError::EmptyContainer);
        }
        self.len -= 1;
        self.slots[self.len].take().ok_or(CoreError::EmptyContainer)
    }

    pub fn peek(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|top| self.slots[top].as_ref())
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots physically holding a value.
    ///
    /// Always equal to [`Stack::len`]; popped slots are emptied.
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Live elements, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    /// Release every live element. Capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }

    fn grow(&mut self) {
        let capacity = self
            .slots
            .len()
            .checked_mul(2)
            .and_then(|c| c.checked_add(1))
            .expect("stack capacity overflow");
        let mut slots = empty_slots(capacity);
        for (dst, src) in slots.iter_mut().zip(self.slots.iter_mut()) {
            *dst = src.take();
        }
        self.slots = slots;
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
