//! # WYRM Core Engine
//!
//! Dense Entity Component System (ECS) designed for:
//! - Stable, copyable entity handles with stale-reference detection
//! - Contiguous per-type component arrays with O(1) attach and detach
//! - Linear signature queries with no per-step allocation
//!
//! ## Architecture Rules
//!
//! 1. **Generational handles** - Recycled slots bump a generation counter,
//!    so handles to destroyed entities miss instead of aliasing
//! 2. **Data-oriented design** - Components are stored in contiguous arrays
//!    kept packed by swap-removal
//! 3. **Pay for what you touch** - Component stores appear on first
//!    attachment; read-only probes never register or allocate
//!
//! ## Example
//!
//! ```rust,ignore
//! use wyrm_core::World;
//!
//! let mut world = World::with_capacity(100_000);
//! let player = world.spawn();
//! world.add_component(player, Transform::default());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;

pub use ecs::{
    AnyStorage, Component, ComponentId, ComponentMask, ComponentRegistry, ComponentStorage,
    EntityAllocator, EntityId, EntityIter, Signature, World,
    DEFAULT_ENTITY_CAPACITY, MAX_COMPONENTS,
};
