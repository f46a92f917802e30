//! Fixed-size entity pools
//!
//! Everything that scrolls is pooled: entities are repositioned when they
//! leave the screen, never destroyed or reallocated, so memory stays constant
//! no matter how long a run lasts. The cursor always points at the single
//! oldest entity, the next one eligible for recycling.

use serde::{Deserialize, Serialize};

/// Fixed-size circular pool with a recycle cursor
///
/// Entities keep their slot for the lifetime of the pool; only their
/// positions and flags change. The cursor walks the slots modulo the pool
/// length, so out-of-range access is impossible by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<T>,
    next: usize,
}

impl<T> Pool<T> {
    /// Build a pool of `len` entities from a slot-index constructor.
    /// Panics if `len` is 0; pool sizes are validated at config time.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        assert!(len >= 1, "pool must hold at least one entity");
        Self {
            slots: (0..len).map(f).collect(),
            next: 0,
        }
    }

    /// Number of slots (constant for the pool's lifetime)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slot index the cursor currently points at
    pub fn cursor(&self) -> usize {
        self.next
    }

    /// The entity currently eligible for recycling
    pub fn current(&self) -> &T {
        &self.slots[self.next]
    }

    pub fn current_mut(&mut self) -> &mut T {
        &mut self.slots[self.next]
    }

    /// Step the recycle cursor forward by one, wrapping at the pool length
    pub fn advance(&mut self) {
        self.next = (self.next + 1) % self.slots.len();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }
}
