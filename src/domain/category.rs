//! Category Entity
//!
//! A named grouping of items. The stored form keeps an ordered list of item
//! references; the populated form carries the resolved items.

use super::entity::Entity;
use super::item::Item;

/// A category with its item references (ids, in insertion order)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub items: Vec<u32>,
}

impl Category {
    /// A new category always starts with an empty item list
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            items: Vec::new(),
        }
    }
}

impl Entity for Category {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A category whose item references have been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedCategory {
    pub id: u32,
    pub name: String,
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let category = Category::new(1, "Work".to_string());
        assert_eq!(category.id(), 1);
        assert!(category.items.is_empty());
    }
}
