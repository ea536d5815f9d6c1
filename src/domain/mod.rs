//! Domain Layer
//!
//! Contains the to-do entities and core abstractions.
//! This layer has no storage or HTTP dependencies.

mod entity;
mod item;
mod category;

pub use entity::{Entity, DomainError, DomainResult, require_name};
pub use item::Item;
pub use category::{Category, PopulatedCategory};
