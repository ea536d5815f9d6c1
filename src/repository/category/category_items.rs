//! Category Item Operations
//!
//! Operations on a category's ordered list of item references.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{require_name, DomainError, DomainResult, Item, PopulatedCategory};
use super::category_repo::CategoryRepository;

/// Trait for category reference list operations
#[async_trait]
pub trait CategoryItemOperations {
    /// Find a category by exact name with its items resolved.
    /// With duplicate names the earliest created category wins.
    async fn find_populated_by_name(&self, name: &str) -> DomainResult<Option<PopulatedCategory>>;

    /// Find a category by ID with its items resolved
    async fn find_populated_by_id(&self, id: u32) -> DomainResult<Option<PopulatedCategory>>;

    /// Create an item and append its reference to the category's list
    async fn add_item(&self, category_id: u32, item: &Item) -> DomainResult<Item>;
}

#[async_trait]
impl CategoryItemOperations for CategoryRepository {
    async fn find_populated_by_name(&self, name: &str) -> DomainResult<Option<PopulatedCategory>> {
        let conn = self.conn.lock().await;

        let found: Option<(u32, String)> = conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ? ORDER BY id LIMIT 1",
                params![name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match found {
            Some((id, name)) => Ok(Some(populate(&conn, id, name)?)),
            None => Ok(None),
        }
    }

    async fn find_populated_by_id(&self, id: u32) -> DomainResult<Option<PopulatedCategory>> {
        let conn = self.conn.lock().await;

        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM categories WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match found {
            Some(name) => Ok(Some(populate(&conn, id, name)?)),
            None => Ok(None),
        }
    }

    async fn add_item(&self, category_id: u32, item: &Item) -> DomainResult<Item> {
        require_name("Item", &item.name)?;

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let next_position: Option<i64> = tx
            .query_row(
                "SELECT (SELECT COALESCE(MAX(position) + 1, 0)
                         FROM category_items WHERE category_id = c.id)
                 FROM categories c WHERE c.id = ?",
                params![category_id],
                |row| row.get(0),
            )
            .optional()?;
        let position = next_position
            .ok_or_else(|| DomainError::NotFound(format!("Category {}", category_id)))?;

        tx.execute(
            "INSERT INTO items (name, created_at) VALUES (?, ?)",
            params![item.name, chrono::Utc::now().timestamp_millis()],
        )?;
        let id = tx.last_insert_rowid() as u32;

        tx.execute(
            "INSERT INTO category_items (category_id, item_id, position) VALUES (?, ?, ?)",
            params![category_id, id, position],
        )?;

        tx.commit()?;
        Ok(Item::new(id, item.name.clone()))
    }
}

/// Resolve the category's references into items, keeping list order
fn populate(conn: &Connection, id: u32, name: String) -> DomainResult<PopulatedCategory> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.name FROM category_items ci
         JOIN items i ON i.id = ci.item_id
         WHERE ci.category_id = ?
         ORDER BY ci.position",
    )?;
    let items = stmt
        .query_map(params![id], |row| Ok(Item::new(row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PopulatedCategory { id, name, items })
}
