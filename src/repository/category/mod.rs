//! Category Repository Module
//!
//! - category_repo: Core CRUD operations (delete cascades to owned items)
//! - category_items: Item reference list operations (populate, append)

mod category_repo;
mod category_items;

pub use category_repo::CategoryRepository;

// Re-exported so callers get the list operations by importing the repository
pub use category_items::CategoryItemOperations;
