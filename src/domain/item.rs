//! Item Entity
//!
//! A single to-do entry. Items belong to one category through the
//! category's reference list; the item itself carries no back-reference.

use super::entity::Entity;

/// A to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier (0 until persisted)
    pub id: u32,
    /// Entry text
    pub name: String,
}

impl Item {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }
}

impl Entity for Item {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
