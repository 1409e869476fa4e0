use branchdo::storage::{LocalStorage, TodoStore};

#[tokio::test]
async fn test_in_memory_storage_creation() {
    let result = LocalStorage::in_memory().await;
    assert!(result.is_ok(), "in-memory storage should be created successfully");
}

#[tokio::test]
async fn test_file_storage_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("branchdo.db");

    {
        let storage = LocalStorage::open(&path).await.unwrap();
        let project_id = storage.fetch_or_create_project("/repo", "main").await.unwrap();
        storage.add_item(project_id, "write tests").await.unwrap();
    }

    assert!(path.exists(), "database file and its parent directory are created");

    let storage = LocalStorage::open(&path).await.unwrap();
    let project_id = storage.fetch_or_create_project("/repo", "main").await.unwrap();
    let items = storage.list_items(project_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].task, "write tests");
}

#[tokio::test]
async fn test_vacuum() {
    let storage = LocalStorage::in_memory().await.unwrap();
    assert!(storage.vacuum().await.is_ok());
}
