//! # Signature Queries
//!
//! Iteration over live entities whose component masks cover a requested set
//! of component types.
//!
//! A [`Signature`] is a tuple of component types resolved against the world's
//! registry into a single [`ComponentMask`]. The iterator walks entity slots
//! in ascending index order and yields every live entity whose mask is a
//! superset of the target. The unit signature `()` matches every live entity.

use super::component::{Component, ComponentMask, ComponentRegistry};
use super::entity::EntityId;
use super::world::World;
use std::iter::FusedIterator;

/// A set of component types an entity must carry to match a query.
///
/// Implemented for the unit type and for tuples of up to eight component
/// types. Tuples resolve to the union of their members' bits.
pub trait Signature {
    /// Resolves this signature against a registry.
    ///
    /// Returns `None` when any member type was never registered with the
    /// world, in which case no entity can match and nothing is looked up
    /// or allocated on the query path.
    fn mask(registry: &ComponentRegistry) -> Option<ComponentMask>;
}

impl Signature for () {
    fn mask(_registry: &ComponentRegistry) -> Option<ComponentMask> {
        Some(ComponentMask::EMPTY)
    }
}

macro_rules! impl_signature_tuple {
    ($($ty:ident),+) => {
        impl<$($ty: Component),+> Signature for ($($ty,)+) {
            fn mask(registry: &ComponentRegistry) -> Option<ComponentMask> {
                let mut mask = ComponentMask::EMPTY;
                $(mask.set(registry.lookup::<$ty>()?);)+
                Some(mask)
            }
        }
    };
}

impl_signature_tuple!(A);
impl_signature_tuple!(A, B);
impl_signature_tuple!(A, B, C);
impl_signature_tuple!(A, B, C, D);
impl_signature_tuple!(A, B, C, D, E);
impl_signature_tuple!(A, B, C, D, E, F);
impl_signature_tuple!(A, B, C, D, E, F, G);
impl_signature_tuple!(A, B, C, D, E, F, G, H);

/// Iterator over live entities matching a signature, in ascending index
/// order.
///
/// The iterator is pre-advanced: it always sits on the next qualifying slot,
/// so construction already skips leading dead or non-matching slots. It
/// borrows the world immutably for its whole lifetime, which rules out
/// structural mutation mid-walk.
pub struct EntityIter<'world> {
    world: &'world World,
    target: ComponentMask,
    next_index: u32,
    end: u32,
}

impl<'world> EntityIter<'world> {
    /// Builds an iterator positioned on the first qualifying slot.
    ///
    /// A `None` target means the signature referenced an unregistered type;
    /// the iterator starts exhausted.
    pub(crate) fn new(world: &'world World, target: Option<ComponentMask>) -> Self {
        let end = world.entity_count() as u32;
        let mut iter = Self {
            world,
            target: target.unwrap_or(ComponentMask::EMPTY),
            next_index: end,
            end,
        };
        if target.is_some() {
            iter.next_index = iter.first_qualifying(0);
        }
        iter
    }

    /// Scans forward from `start` to the first live slot whose mask covers
    /// the target, or to the end of the probed range.
    fn first_qualifying(&self, start: u32) -> u32 {
        let mut index = start;
        while index < self.end {
            let live = self.world.entity_at(index).is_valid();
            if live && self.world.mask_at(index).contains_all(self.target) {
                break;
            }
            index += 1;
        }
        index
    }
}

impl Iterator for EntityIter<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        if self.next_index >= self.end {
            return None;
        }
        let handle = self.world.entity_at(self.next_index);
        self.next_index = self.first_qualifying(self.next_index + 1);
        Some(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next_index) as usize;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for EntityIter<'_> {}
