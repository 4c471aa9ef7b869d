//! # Entity Component System
//!
//! In-process entity-component storage built around three pieces:
//!
//! - [`EntityAllocator`]: generational handles over a fixed pool of slots
//! - [`ComponentStorage`]: one dense, hole-free array per component type
//! - [`World`]: the facade tying allocation, registration, and storage
//!   together, plus signature queries over live entities
//!
//! Handles stay cheap to copy and safe to hold across destruction: a recycled
//! slot bumps its generation, so probes with stale handles miss instead of
//! aliasing the new occupant.

pub mod component;
pub mod entity;
pub mod query;
pub mod storage;
pub mod world;

pub use component::{Component, ComponentId, ComponentMask, ComponentRegistry, MAX_COMPONENTS};
pub use entity::{EntityAllocator, EntityId};
pub use query::{EntityIter, Signature};
pub use storage::{AnyStorage, ComponentStorage};
pub use world::{World, DEFAULT_ENTITY_CAPACITY};
