//! Entity trait: identity + continuity across state changes.

use std::sync::Arc;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

impl<E> Entity for Arc<E>
where
    E: Entity + ?Sized,
{
    type Id = E::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }
}

/// Locate an entity by identity in an ordered collection.
///
/// Returns the position alongside the entity so callers can replace it in place
/// without a second scan.
pub fn find_by_id<'a, E>(entities: &'a [E], id: &E::Id) -> Option<(usize, &'a E)>
where
    E: Entity,
{
    entities.iter().enumerate().find(|(_, e)| e.id() == id)
}
