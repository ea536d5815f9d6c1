//! Item commands

use log::info;

use crate::domain::{DomainError, DomainResult, Item};
use crate::repository::CategoryItemOperations;
use crate::AppState;

/// Add an item to the named category and return the category's updated items
pub async fn add_item(
    state: &AppState,
    item_name: &str,
    category_name: &str,
) -> DomainResult<Vec<Item>> {
    let category = state
        .category_repo
        .find_populated_by_name(category_name)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Category {:?}", category_name)))?;

    let saved = state
        .category_repo
        .add_item(category.id, &Item::new(0, item_name.to_string()))
        .await?;
    info!("Added item {} ({}) to {}", saved.name, saved.id, category.name);

    let updated = state
        .category_repo
        .find_populated_by_id(category.id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Category {:?}", category_name)))?;
    Ok(updated.items)
}

/// Items of the named category, resolved and in list order
pub async fn list_items(state: &AppState, category_name: &str) -> DomainResult<Vec<Item>> {
    state
        .category_repo
        .find_populated_by_name(category_name)
        .await?
        .map(|category| category.items)
        .ok_or_else(|| DomainError::NotFound(format!("Category {:?}", category_name)))
}

/// Delete one item and its reference in the owning category
pub async fn delete_item(state: &AppState, item_id: u32) -> DomainResult<()> {
    state.item_repo.delete(item_id).await?;
    info!("Deleted item {}", item_id);
    Ok(())
}
