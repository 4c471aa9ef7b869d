//! # Component Identity
//!
//! Component types are identified by small integer IDs handed out in
//! first-use order. The ID doubles as:
//! - the bit position in each entity's presence mask
//! - the index of the type's storage in the world's store table
//!
//! IDs are owned by the registry instance, so independent worlds never
//! share numbering and tests get a fresh ID space for free.

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Maximum number of distinct component types a world can register.
///
/// Bounds the presence-mask width and the store table size. Exceeding it
/// is a configuration error, reported by an assert in [`ComponentRegistry`].
pub const MAX_COMPONENTS: usize = 32;

// Presence masks are stored as u64, so the limit cannot exceed the mask width.
const _: () = assert!(MAX_COMPONENTS <= 64, "MAX_COMPONENTS exceeds mask width");

/// Marker trait for ECS components.
///
/// Components are plain data: any `'static` type qualifies, including types
/// that own heap data. No methods are required, the blanket implementation
/// covers everything.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Default, Clone, Copy)]
/// struct Position {
///     x: f32,
///     y: f32,
///     z: f32,
/// }
/// // `Position` is already a Component, nothing to implement.
/// ```
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Identifier for a registered component type.
///
/// Assigned by [`ComponentRegistry`] in first-use order starting at 0.
/// Stable for the lifetime of the owning world, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ComponentId(u32);

impl ComponentId {
    const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the ID as a table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bitset recording which component types an entity carries.
///
/// Bit position equals [`ComponentId`]. Up to [`MAX_COMPONENTS`] bits are
/// meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct ComponentMask(u64);

impl ComponentMask {
    /// Mask with no bits set. Matches every entity when used as a signature.
    pub const EMPTY: Self = Self(0);

    /// Checks whether no component bits are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks whether the bit for `id` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: ComponentId) -> bool {
        (self.0 & (1 << id.0)) != 0
    }

    /// Checks whether every bit of `required` is also set in `self`.
    ///
    /// This is the signature superset test used by iteration.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, required: Self) -> bool {
        (self.0 & required.0) == required.0
    }

    /// Returns a copy of the mask with the bit for `id` set.
    #[inline]
    #[must_use]
    pub const fn with(self, id: ComponentId) -> Self {
        Self(self.0 | (1 << id.0))
    }

    /// Sets the bit for `id`.
    #[inline]
    pub fn set(&mut self, id: ComponentId) {
        self.0 |= 1 << id.0;
    }

    /// Clears the bit for `id`.
    #[inline]
    pub fn clear(&mut self, id: ComponentId) {
        self.0 &= !(1 << id.0);
    }
}

/// Registry mapping component types to their IDs.
///
/// IDs are handed out the first time a type is registered and never change
/// afterwards. There is no removal and no reuse.
///
/// Read paths use [`ComponentRegistry::lookup`], which never assigns: a type
/// that was never attached anywhere cannot have data or match a signature, so
/// an unknown type simply resolves to `None`.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: HashMap::with_capacity(MAX_COMPONENTS),
        }
    }

    /// Returns the ID for `T`, assigning the next free ID on first use.
    ///
    /// Idempotent per type: every later call returns the same ID.
    ///
    /// # Panics
    ///
    /// Panics when a new type would exceed [`MAX_COMPONENTS`].
    pub fn id_of<T: Component>(&mut self) -> ComponentId {
        let next = self.ids.len();
        match self.ids.entry(TypeId::of::<T>()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                assert!(
                    next < MAX_COMPONENTS,
                    "component type limit reached ({MAX_COMPONENTS})"
                );
                *entry.insert(ComponentId::new(next))
            }
        }
    }

    /// Returns the ID for `T` if the type has been registered.
    #[inline]
    #[must_use]
    pub fn lookup<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the number of registered component types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks whether no component types have been registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
