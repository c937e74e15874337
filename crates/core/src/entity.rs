//! Entity traits: identity and ownership.

use crate::id::UserId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity that records which user created it.
///
/// Ownership is the only resource attribute the authorization layer looks at.
pub trait Owned: Entity {
    fn created_by(&self) -> &UserId;
}
