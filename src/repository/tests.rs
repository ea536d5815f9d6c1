//! Repository Integration Tests
//!
//! Tests for CategoryRepository and ItemRepository with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{Category, DomainError, Item};
    use crate::repository::{
        init_db, CategoryItemOperations, CategoryRepository, ItemRepository, Repository,
    };

    async fn setup_test_db() -> (CategoryRepository, ItemRepository) {
        let db_state = init_db(":memory:").await.expect("Failed to init test DB");
        (
            CategoryRepository::new(db_state.connection()),
            ItemRepository::new(db_state.connection()),
        )
    }

    async fn create_category(repo: &CategoryRepository, name: &str) -> Category {
        repo.create(&Category::new(0, name.to_string()))
            .await
            .expect("Failed to create category")
    }

    async fn add(repo: &CategoryRepository, category_id: u32, name: &str) -> Item {
        repo.add_item(category_id, &Item::new(0, name.to_string()))
            .await
            .expect("Failed to add item")
    }

    #[tokio::test]
    async fn test_create_category() {
        let (categories, _) = setup_test_db().await;

        let created = create_category(&categories, "Work").await;
        assert!(created.id > 0);
        assert_eq!(created.name, "Work");
        assert!(created.items.is_empty());
    }

    #[tokio::test]
    async fn test_create_category_requires_name() {
        let (categories, _) = setup_test_db().await;

        let result = categories.create(&Category::new(0, "  ".to_string())).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(categories.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_categories_in_creation_order() {
        let (categories, _) = setup_test_db().await;

        create_category(&categories, "Work").await;
        let home = create_category(&categories, "Home").await;
        let milk = add(&categories, home.id, "Milk").await;

        let listed = categories.list().await.expect("List failed");
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Home"]);
        assert!(listed[0].items.is_empty());
        assert_eq!(listed[1].items, vec![milk.id]);
    }

    #[tokio::test]
    async fn test_find_by_id_includes_references() {
        let (categories, _) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        let a = add(&categories, work.id, "Email").await;
        let b = add(&categories, work.id, "Report").await;

        let found = categories.find_by_id(work.id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![a.id, b.id]);
        assert!(categories.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_item_appends_in_order() {
        let (categories, items) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        add(&categories, work.id, "First").await;
        let second = add(&categories, work.id, "Second").await;

        let populated = categories.find_populated_by_name("Work").await.unwrap().unwrap();
        let names: Vec<&str> = populated.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);

        let stored = items.find_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Second");
    }

    #[tokio::test]
    async fn test_add_item_to_missing_category() {
        let (categories, items) = setup_test_db().await;

        let result = categories.add_item(42, &Item::new(0, "Orphan".to_string())).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
        // The insert was rolled back
        assert!(items.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_requires_name() {
        let (categories, _) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        let result = categories.add_item(work.id, &Item::new(0, String::new())).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_find_populated_by_name() {
        let (categories, _) = setup_test_db().await;

        let first = create_category(&categories, "Dup").await;
        let second = create_category(&categories, "Dup").await;
        add(&categories, second.id, "Only in second").await;

        let found = categories.find_populated_by_name("Dup").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(found.items.is_empty());

        assert!(categories.find_populated_by_name("dup").await.unwrap().is_none());
        assert!(categories.find_populated_by_name("Missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_category_cascades() {
        let (categories, items) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        let home = create_category(&categories, "Home").await;
        add(&categories, work.id, "Email").await;
        add(&categories, work.id, "Report").await;
        let dishes = add(&categories, home.id, "Dishes").await;

        categories.delete(work.id).await.expect("Delete failed");

        assert!(categories.find_by_id(work.id).await.unwrap().is_none());
        let remaining = items.list().await.unwrap();
        assert_eq!(remaining, vec![dishes]);
        assert_eq!(categories.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_category_rolls_back_on_failure() {
        let db_state = init_db(":memory:").await.expect("Failed to init test DB");
        let categories = CategoryRepository::new(db_state.connection());
        let items = ItemRepository::new(db_state.connection());

        let work = create_category(&categories, "Work").await;
        let email = add(&categories, work.id, "Email").await;
        let report = add(&categories, work.id, "Report").await;

        db_state
            .connection()
            .lock()
            .await
            .execute_batch(
                "CREATE TRIGGER block_category_delete BEFORE DELETE ON categories
                 BEGIN SELECT RAISE(ABORT, 'category delete blocked'); END;",
            )
            .expect("Failed to create trigger");

        let result = categories.delete(work.id).await;
        assert!(matches!(result, Err(DomainError::Internal(_))));

        assert_eq!(items.list().await.unwrap(), vec![email.clone(), report.clone()]);
        let found = categories.find_by_id(work.id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![email.id, report.id]);
        let populated = categories.find_populated_by_id(work.id).await.unwrap().unwrap();
        assert_eq!(populated.items, vec![email, report]);
    }

    #[tokio::test]
    async fn test_delete_missing_category() {
        let (categories, _) = setup_test_db().await;

        let result = categories.delete(7).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_item_removes_reference() {
        let (categories, items) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        let email = add(&categories, work.id, "Email").await;
        let report = add(&categories, work.id, "Report").await;

        items.delete(email.id).await.expect("Delete failed");

        assert!(items.find_by_id(email.id).await.unwrap().is_none());
        let found = categories.find_by_id(work.id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![report.id]);
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let (_, items) = setup_test_db().await;

        let result = items.delete(3).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_position_continues_after_delete() {
        let (categories, items) = setup_test_db().await;

        let work = create_category(&categories, "Work").await;
        let a = add(&categories, work.id, "A").await;
        let b = add(&categories, work.id, "B").await;
        items.delete(b.id).await.unwrap();
        let c = add(&categories, work.id, "C").await;

        let found = categories.find_populated_by_id(work.id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![a, c]);
    }
}
