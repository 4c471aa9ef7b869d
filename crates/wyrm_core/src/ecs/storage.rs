//! # Component Storage
//!
//! One dense array per component type, kept packed with no holes.
//!
//! The storage uses a sparse-set strategy:
//! - `dense` holds the component values, contiguous over `[0, len)`
//! - `dense_to_entity` maps each dense slot back to its entity index
//! - `entity_to_dense` maps entity indices to dense slots, with a vacant
//!   sentinel for entities that lack this component
//!
//! Removal relocates the last dense element into the vacated slot, so dense
//! positions are unstable across removals; only entity-index lookup is.

use super::component::Component;
use std::any::Any;

/// Sentinel marking an entity index without a component in this store.
const VACANT: u32 = u32::MAX;

/// Dense storage for a single component type.
///
/// Values live packed in insertion order until a removal relocates the tail.
/// The two translation tables are kept mutual inverses over the occupied
/// range, which is what makes O(1) removal safe for unrelated lookups.
///
/// # Type Parameters
///
/// * `T` - The component type to store
pub struct ComponentStorage<T: Component> {
    /// Packed component values, length equals the live count.
    dense: Vec<T>,
    /// Entity index owning each dense slot. Parallel to `dense`.
    dense_to_entity: Vec<u32>,
    /// Dense slot per entity index, `VACANT` when absent.
    entity_to_dense: Vec<u32>,
}

impl<T: Component> ComponentStorage<T> {
    /// Creates an empty storage for a world of `entity_capacity` slots.
    ///
    /// The sparse table is sized upfront; the dense side grows with actual
    /// insertions.
    ///
    /// # Panics
    ///
    /// Panics if `entity_capacity` is zero.
    #[must_use]
    pub fn with_capacity(entity_capacity: usize) -> Self {
        assert!(entity_capacity > 0, "entity capacity must be greater than zero");

        Self {
            dense: Vec::new(),
            dense_to_entity: Vec::new(),
            entity_to_dense: vec![VACANT; entity_capacity],
        }
    }

    /// Appends a value for `entity_index` at the end of the dense array.
    ///
    /// The caller guarantees the entity does not already have this component;
    /// duplicate attachment is rejected upstream by the presence mask.
    ///
    /// # Panics
    ///
    /// Panics if `entity_index` exceeds the entity capacity this storage was
    /// created with.
    pub fn insert(&mut self, entity_index: u32, value: T) {
        debug_assert!(!self.has(entity_index), "entity already present in this store");

        let dense_index = self.dense.len() as u32;
        self.dense.push(value);
        self.dense_to_entity.push(entity_index);
        self.entity_to_dense[entity_index as usize] = dense_index;
    }

    /// Removes and returns the value stored for `entity_index`.
    ///
    /// Swap-remove: the last dense element moves into the vacated slot and
    /// both translation tables are patched, so the array stays hole-free.
    /// Removing the last remaining element skips the relocation.
    ///
    /// The caller guarantees the entity has this component; a missing entry
    /// is rejected upstream by the presence mask.
    pub fn remove(&mut self, entity_index: u32) -> T {
        let removed = self.entity_to_dense[entity_index as usize];
        debug_assert!(removed != VACANT, "entity not present in this store");
        let removed_index = removed as usize;

        let value = self.dense.swap_remove(removed_index);
        self.dense_to_entity.swap_remove(removed_index);

        // When a tail element was relocated, point its entity at the new slot.
        if removed_index < self.dense.len() {
            let moved_entity = self.dense_to_entity[removed_index];
            self.entity_to_dense[moved_entity as usize] = removed;
        }
        self.entity_to_dense[entity_index as usize] = VACANT;

        value
    }

    /// Returns the value stored for `entity_index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, entity_index: u32) -> Option<&T> {
        let dense_index = *self.entity_to_dense.get(entity_index as usize)?;
        if dense_index == VACANT {
            return None;
        }
        self.dense.get(dense_index as usize)
    }

    /// Returns the value stored for `entity_index` mutably, if any.
    #[inline]
    pub fn get_mut(&mut self, entity_index: u32) -> Option<&mut T> {
        let dense_index = *self.entity_to_dense.get(entity_index as usize)?;
        if dense_index == VACANT {
            return None;
        }
        self.dense.get_mut(dense_index as usize)
    }

    /// Checks whether `entity_index` has a value in this store.
    #[inline]
    #[must_use]
    pub fn has(&self, entity_index: u32) -> bool {
        self.entity_to_dense
            .get(entity_index as usize)
            .is_some_and(|&dense_index| dense_index != VACANT)
    }

    /// Returns the number of stored values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Checks whether the store holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the packed values as a slice.
    ///
    /// Ordering is unspecified and changes across removals; useful for batch
    /// reads that do not care which entity owns which value.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.dense
    }

    /// Returns the packed values as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.dense
    }
}

/// Type-erased handle to a [`ComponentStorage`].
///
/// The facade keeps one boxed store per registered component type and only
/// needs a single uniform capability: dropping an entity's value when the
/// entity is destroyed. Typed access goes through the `Any` hooks.
pub trait AnyStorage {
    /// Removes the entity's value if this store holds one.
    ///
    /// Invoked for every store when an entity is destroyed, whether or not
    /// the entity has the component.
    fn on_entity_destroyed(&mut self, entity_index: u32);

    /// Upcasts for typed read access.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for typed write access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn on_entity_destroyed(&mut self, entity_index: u32) {
        if self.has(entity_index) {
            self.remove(entity_index);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
