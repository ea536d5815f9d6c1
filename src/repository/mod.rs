//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod item_repo;
pub mod category;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbState};
pub use item_repo::ItemRepository;
pub use category::{CategoryRepository, CategoryItemOperations};
