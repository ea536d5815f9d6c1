//! Item Repository
//!
//! Lookups and deletion for items. Items are created through
//! `CategoryItemOperations::add_item` so every item has an owner.

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Item};

pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Find item by ID
    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;

        let item = conn
            .query_row(
                "SELECT id, name FROM items WHERE id = ?",
                params![id],
                |row| Ok(Item::new(row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(item)
    }

    /// List all items in creation order
    pub async fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare("SELECT id, name FROM items ORDER BY id")?;
        let items = stmt
            .query_map([], |row| Ok(Item::new(row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Delete an item together with its reference in the owning category
    pub async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM category_items WHERE item_id = ?", params![id])?;
        let removed = tx.execute("DELETE FROM items WHERE id = ?", params![id])?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("Item {}", id)));
        }

        tx.commit()?;
        Ok(())
    }
}
