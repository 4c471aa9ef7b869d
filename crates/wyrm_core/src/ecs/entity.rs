//! # Entity Management
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into per-slot state and component stores
//! - A generation counter for safe slot reuse
//!
//! The allocator owns the canonical slot state: the handle currently
//! occupying each index and the entity's component-presence mask. Freed
//! indices are recycled through a stack, and the generation stored in a
//! freed slot is already incremented, so the next occupant picks it up
//! without further bookkeeping.

use super::component::ComponentMask;

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into slot and component tables
/// - Upper 32 bits: Generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Index value that never belongs to a live entity.
    pub const INVALID_INDEX: u32 = u32::MAX;

    /// Sentinel handle: invalid index, generation 0.
    ///
    /// Returned by fallible lookups and by spawning at capacity. Never
    /// compares equal to a live handle.
    pub const INVALID: Self = Self::new(Self::INVALID_INDEX, 0);

    /// Creates a new entity ID from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index (0 to 2^32-2; 2^32-1 is reserved)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Checks whether the index portion refers to a real slot.
    ///
    /// Freed slots store a handle with [`EntityId::INVALID_INDEX`] and a
    /// bumped generation, so they also read as invalid here.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index() != Self::INVALID_INDEX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Per-index slot state: the occupying handle and the presence mask.
#[derive(Clone, Copy, Debug)]
struct EntitySlot {
    handle: EntityId,
    mask: ComponentMask,
}

/// Allocator for entity handles with generational index reuse.
///
/// Slots are appended on demand up to a fixed capacity, so
/// [`EntityAllocator::count`] is a high-water mark: freed slots stay counted
/// until they are reused, and traversal must skip them via liveness checks.
#[derive(Debug)]
pub struct EntityAllocator {
    /// Slot state, indexed by entity index. Grows up to `capacity`.
    slots: Vec<EntitySlot>,
    /// Stack of freed indices awaiting reuse.
    free_indices: Vec<u32>,
    /// Number of currently live entities.
    live: usize,
    /// Maximum number of simultaneously allocated slots.
    capacity: usize,
}

impl EntityAllocator {
    /// Creates an allocator bounded at `capacity` entities.
    ///
    /// Slot and free-list storage is reserved upfront so steady-state
    /// create/recycle cycles never allocate.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not stay below `u32::MAX`
    /// (the top index is reserved for [`EntityId::INVALID`]).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "entity capacity must be greater than zero");
        assert!(
            capacity < u32::MAX as usize,
            "entity capacity must stay below u32::MAX"
        );

        Self {
            slots: Vec::with_capacity(capacity),
            free_indices: Vec::with_capacity(capacity),
            live: 0,
            capacity,
        }
    }

    /// Allocates a handle, reusing a freed index when one is available.
    ///
    /// A recycled slot keeps the generation stored at release time, a fresh
    /// slot starts at generation 0.
    ///
    /// # Returns
    ///
    /// The new handle, or [`EntityId::INVALID`] if the capacity is exhausted.
    #[inline]
    pub fn create(&mut self) -> EntityId {
        let handle = if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            let handle = EntityId::new(index, slot.handle.generation());
            *slot = EntitySlot {
                handle,
                mask: ComponentMask::EMPTY,
            };
            handle
        } else if self.slots.len() < self.capacity {
            let handle = EntityId::new(self.slots.len() as u32, 0);
            self.slots.push(EntitySlot {
                handle,
                mask: ComponentMask::EMPTY,
            });
            handle
        } else {
            return EntityId::INVALID;
        };

        self.live += 1;
        handle
    }

    /// Releases a live handle's slot for reuse.
    ///
    /// The slot handle is rewritten to an invalid index with the generation
    /// incremented (wrapping), the mask is cleared and the index is pushed
    /// onto the free stack. The caller must have verified that `id` is live,
    /// see [`EntityAllocator::is_live`].
    #[inline]
    pub fn recycle(&mut self, id: EntityId) {
        debug_assert!(self.is_live(id), "recycle requires a live handle");

        let index = id.index();
        self.slots[index as usize] = EntitySlot {
            handle: EntityId::new(EntityId::INVALID_INDEX, id.generation().wrapping_add(1)),
            mask: ComponentMask::EMPTY,
        };
        self.free_indices.push(index);
        self.live -= 1;
    }

    /// Checks whether `id` currently occupies its slot.
    ///
    /// Safe to probe with any handle value: invalid, out of range and stale
    /// handles all report `false`.
    #[inline]
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        id.is_valid()
            && self
                .slots
                .get(id.index() as usize)
                .is_some_and(|slot| slot.handle == id)
    }

    /// Returns the handle stored at `index`.
    ///
    /// The result may be stale or dead; callers re-check with
    /// [`EntityAllocator::is_live`]. Out-of-range indices yield
    /// [`EntityId::INVALID`].
    #[inline]
    #[must_use]
    pub fn handle_at(&self, index: u32) -> EntityId {
        self.slots
            .get(index as usize)
            .map_or(EntityId::INVALID, |slot| slot.handle)
    }

    /// Returns the presence mask stored at `index`.
    ///
    /// Freed slots carry a cleared mask; out-of-range indices yield the
    /// empty mask.
    #[inline]
    #[must_use]
    pub fn mask(&self, index: u32) -> ComponentMask {
        self.slots
            .get(index as usize)
            .map_or(ComponentMask::EMPTY, |slot| slot.mask)
    }

    /// Returns a mutable reference to the presence mask at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` has never been allocated.
    #[inline]
    pub fn mask_mut(&mut self, index: u32) -> &mut ComponentMask {
        &mut self.slots[index as usize].mask
    }

    /// Returns the number of allocated slots, including freed ones.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently live entities.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live
    }

    /// Returns the maximum number of entities this allocator can hold.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
