//! `campusnav-core`: shared domain primitives (identifiers, errors, ownership).
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, Owned};
pub use error::{DomainError, DomainResult};
pub use id::{EventId, LocationId, UserId};
