//! `salesdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no UI, no IO).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{AggregateId, EntityId};
pub use value_object::ValueObject;
