//! Category commands

use log::{error, info};

use crate::domain::{Category, DomainResult};
use crate::repository::Repository;
use crate::AppState;

/// Create a new, empty category.
///
/// Failures are logged and swallowed; the caller always carries on.
pub async fn create_category(state: &AppState, name: &str) {
    match state.category_repo.create(&Category::new(0, name.to_string())).await {
        Ok(saved) => info!("Saved category {} ({})", saved.name, saved.id),
        Err(e) => error!("Failed to save category {:?}: {}", name, e),
    }
}

/// All categories with unresolved item references
pub async fn list_categories(state: &AppState) -> DomainResult<Vec<Category>> {
    state.category_repo.list().await
}

/// Delete a category together with all of its items
pub async fn delete_category_cascade(state: &AppState, category_id: u32) -> DomainResult<()> {
    state.category_repo.delete(category_id).await?;
    info!("Deleted category {} and its items", category_id);
    Ok(())
}
