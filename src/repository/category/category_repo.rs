//! Category Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Category CRUD operations.
//! Reference list operations live in `category_items`.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{require_name, Category, DomainError, DomainResult};
use super::super::traits::Repository;

/// SQLite implementation of Category repository
pub struct CategoryRepository {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl CategoryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn create(&self, entity: &Category) -> DomainResult<Category> {
        require_name("Category", &entity.name)?;

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO categories (name, created_at) VALUES (?, ?)",
            params![entity.name, chrono::Utc::now().timestamp_millis()],
        )?;

        let id = conn.last_insert_rowid() as u32;
        Ok(Category::new(id, entity.name.clone()))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Category>> {
        let conn = self.conn.lock().await;

        let found = conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?",
                params![id],
                |row| Ok(Category::new(row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match found {
            Some(mut category) => {
                category.items = item_refs(&conn, category.id)?;
                Ok(Some(category))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let mut categories = stmt
            .query_map([], |row| Ok(Category::new(row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        // Attach references in one pass instead of one query per category
        let mut refs: HashMap<u32, Vec<u32>> = HashMap::new();
        let mut stmt = conn.prepare(
            "SELECT category_id, item_id FROM category_items ORDER BY category_id, position",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            refs.entry(row.get(0)?).or_default().push(row.get(1)?);
        }

        for category in &mut categories {
            category.items = refs.remove(&category.id).unwrap_or_default();
        }
        Ok(categories)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;

        // Items, references and the category go together or not at all
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)",
            params![id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DomainError::NotFound(format!("Category {}", id)));
        }

        tx.execute(
            "DELETE FROM items WHERE id IN (
                SELECT item_id FROM category_items WHERE category_id = ?
            )",
            params![id],
        )?;
        tx.execute("DELETE FROM category_items WHERE category_id = ?", params![id])?;
        tx.execute("DELETE FROM categories WHERE id = ?", params![id])?;

        tx.commit()?;
        Ok(())
    }
}

/// Item ids referenced by a category, in list order
pub(super) fn item_refs(conn: &Connection, category_id: u32) -> DomainResult<Vec<u32>> {
    let mut stmt = conn.prepare(
        "SELECT item_id FROM category_items WHERE category_id = ? ORDER BY position",
    )?;
    let ids = stmt
        .query_map(params![category_id], |row| row.get(0))?
        .collect::<Result<Vec<u32>, _>>()?;
    Ok(ids)
}
