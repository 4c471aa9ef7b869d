//! # World
//!
//! Facade over the entity allocator, the component registry, and the
//! per-type component stores.
//!
//! The world owns one type-erased store per registered component type,
//! created lazily on first attachment. All operations probe liveness first,
//! so stale handles degrade to no-ops instead of touching recycled slots.

use super::component::{Component, ComponentId, ComponentMask, ComponentRegistry};
use super::entity::{EntityAllocator, EntityId};
use super::query::{EntityIter, Signature};
use super::storage::{AnyStorage, ComponentStorage};

/// Number of entity slots a [`World::new`] world reserves.
pub const DEFAULT_ENTITY_CAPACITY: usize = 5000;

/// Container for entities and their components.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::with_capacity(1024);
/// let player = world.spawn();
/// world.add_component(player, Position { x: 0.0, y: 0.0 });
/// world.add_component(player, Velocity { dx: 1.0, dy: 0.0 });
///
/// for entity in world.entities_with::<(Position, Velocity)>() {
///     // movement system
/// }
/// ```
pub struct World {
    /// Entity slots, generations, and per-slot presence masks.
    allocator: EntityAllocator,
    /// Component type to ID mapping, scoped to this world.
    registry: ComponentRegistry,
    /// Type-erased stores indexed by component ID. `None` until a type's
    /// first attachment; read-only probes never fill a slot in.
    stores: Vec<Option<Box<dyn AnyStorage>>>,
}

impl World {
    /// Creates a world with [`DEFAULT_ENTITY_CAPACITY`] entity slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ENTITY_CAPACITY)
    }

    /// Creates a world with a fixed number of entity slots.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of simultaneously live entities
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not fit in a `u32` index.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            allocator: EntityAllocator::with_capacity(capacity),
            registry: ComponentRegistry::new(),
            stores: Vec::new(),
        }
    }

    /// Creates a new entity and returns its handle.
    ///
    /// Returns [`EntityId::INVALID`] when every slot is live; the caller
    /// decides whether exhaustion is recoverable.
    pub fn spawn(&mut self) -> EntityId {
        self.allocator.create()
    }

    /// Destroys an entity, dropping every component it carries.
    ///
    /// Each existing store is notified before the slot is recycled, so
    /// component values are released while the entity index still refers to
    /// the dying entity. Returns `false` for stale or invalid handles.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.allocator.is_live(entity) {
            return false;
        }

        let index = entity.index();
        for store in self.stores.iter_mut().flatten() {
            store.on_entity_destroyed(index);
        }
        self.allocator.recycle(entity);
        true
    }

    /// Checks whether a handle refers to a live entity.
    ///
    /// Safe to call with any handle, including [`EntityId::INVALID`] and
    /// handles from other worlds.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.allocator.is_live(entity)
    }

    /// Attaches a component value to an entity.
    ///
    /// Registers the component type on first use and creates its store
    /// lazily. Returns `false` when the entity is not live or already has a
    /// component of this type; the value is dropped in that case.
    pub fn add_component<T: Component>(&mut self, entity: EntityId, value: T) -> bool {
        if !self.allocator.is_live(entity) {
            return false;
        }

        let id = self.registry.id_of::<T>();
        let index = entity.index();
        if self.allocator.mask(index).contains(id) {
            return false;
        }

        let capacity = self.allocator.capacity();
        self.store_or_create::<T>(id, capacity).insert(index, value);
        self.allocator.mask_mut(index).set(id);
        true
    }

    /// Attaches `T::default()` to an entity.
    ///
    /// Same outcome signalling as [`World::add_component`].
    pub fn add_component_default<T: Component + Default>(&mut self, entity: EntityId) -> bool {
        self.add_component(entity, T::default())
    }

    /// Detaches a component from an entity and returns its value.
    ///
    /// Returns `None` when the entity is not live, the type was never
    /// registered, or the entity does not carry the component.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        if !self.allocator.is_live(entity) {
            return None;
        }

        let id = self.registry.lookup::<T>()?;
        let index = entity.index();
        if !self.allocator.mask(index).contains(id) {
            return None;
        }

        let value = self.typed_store_mut::<T>(id)?.remove(index);
        self.allocator.mask_mut(index).clear(id);
        Some(value)
    }

    /// Checks whether a live entity carries a component of type `T`.
    ///
    /// A type that was never attached anywhere simply matches nothing; the
    /// probe registers nothing and allocates nothing.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        if !self.allocator.is_live(entity) {
            return false;
        }
        self.registry
            .lookup::<T>()
            .is_some_and(|id| self.allocator.mask(entity.index()).contains(id))
    }

    /// Returns a reference to an entity's component of type `T`.
    #[must_use]
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if !self.allocator.is_live(entity) {
            return None;
        }
        let id = self.registry.lookup::<T>()?;
        self.typed_store::<T>(id)?.get(entity.index())
    }

    /// Returns a mutable reference to an entity's component of type `T`.
    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.allocator.is_live(entity) {
            return None;
        }
        let id = self.registry.lookup::<T>()?;
        let index = entity.index();
        self.typed_store_mut::<T>(id)?.get_mut(index)
    }

    /// Returns the presence mask of a live entity.
    ///
    /// Stale or invalid handles yield the empty mask.
    #[must_use]
    pub fn component_mask(&self, entity: EntityId) -> ComponentMask {
        if !self.allocator.is_live(entity) {
            return ComponentMask::EMPTY;
        }
        self.allocator.mask(entity.index())
    }

    /// Returns the handle currently occupying slot `index`.
    ///
    /// Returns [`EntityId::INVALID`] for free slots and for indices outside
    /// the slot table.
    #[must_use]
    pub fn entity_at(&self, index: u32) -> EntityId {
        let handle = self.allocator.handle_at(index);
        if handle.is_valid() {
            handle
        } else {
            EntityId::INVALID
        }
    }

    /// Returns the number of entity slots ever created.
    ///
    /// This is a high-water mark: destroyed entities stay counted until
    /// their slot is reused. Pair slot indices with [`World::entity_at`] to
    /// skip the dead ones.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.allocator.count()
    }

    /// Returns the number of currently live entities.
    #[inline]
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.allocator.live_count()
    }

    /// Returns the fixed number of entity slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.allocator.capacity()
    }

    /// Iterates over live entities carrying every component type in `S`.
    ///
    /// Entities come out in ascending slot order. Signatures naming a type
    /// that was never attached anywhere match no entities.
    #[must_use]
    pub fn entities_with<S: Signature>(&self) -> EntityIter<'_> {
        EntityIter::new(self, S::mask(&self.registry))
    }

    /// Iterates over every live entity in ascending slot order.
    #[must_use]
    pub fn iter_alive(&self) -> EntityIter<'_> {
        self.entities_with::<()>()
    }

    /// Returns the dense store backing component type `T`, if it exists.
    ///
    /// Useful for batch access to the packed values via
    /// [`ComponentStorage::as_slice`].
    #[must_use]
    pub fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        let id = self.registry.lookup::<T>()?;
        self.typed_store::<T>(id)
    }

    /// Returns the dense store backing component type `T` mutably.
    pub fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        let id = self.registry.lookup::<T>()?;
        self.typed_store_mut::<T>(id)
    }

    /// Presence mask of slot `index`, free slots included.
    pub(crate) fn mask_at(&self, index: u32) -> ComponentMask {
        self.allocator.mask(index)
    }

    /// Returns the store for `id`, creating and registering it on first use.
    fn store_or_create<T: Component>(
        &mut self,
        id: ComponentId,
        entity_capacity: usize,
    ) -> &mut ComponentStorage<T> {
        let slot = id.index();
        if slot >= self.stores.len() {
            self.stores.resize_with(slot + 1, || None);
        }
        self.stores[slot]
            .get_or_insert_with(|| {
                Box::new(ComponentStorage::<T>::with_capacity(entity_capacity)) as Box<dyn AnyStorage>
            })
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .expect("component store type mismatch")
    }

    fn typed_store<T: Component>(&self, id: ComponentId) -> Option<&ComponentStorage<T>> {
        self.stores
            .get(id.index())?
            .as_ref()?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn typed_store_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut ComponentStorage<T>> {
        self.stores
            .get_mut(id.index())?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
