use anyhow::Result;
use sea_orm::TransactionTrait;

use crate::entities::todo;
use crate::repositories::{BranchSummary, ProjectRepository, TodoRepository};
use crate::storage::LocalStorage;

impl LocalStorage {
    /// Rename a project.
    pub async fn update_project_name(&self, project_id: i32, name: &str) -> Result<()> {
        ProjectRepository::update_name(&self.conn, project_id, name).await
    }

    /// Branches of a repository that hold items.
    pub async fn branches(&self, folder: &str) -> Result<Vec<BranchSummary>> {
        ProjectRepository::branches(&self.conn, folder).await
    }

    /// Delete a project with its items and time entries.
    pub async fn delete_project(&self, project_id: i32) -> Result<()> {
        ProjectRepository::delete(&self.conn, project_id).await
    }

    /// Append copies of every item of `from` to `to`, keeping their order.
    /// Copies start out open and uncommitted.
    pub async fn copy_project_items(&self, from: i32, to: i32) -> Result<u64> {
        let txn = self.conn.begin().await?;
        let items = TodoRepository::get_for_project(&txn, from).await?;
        let count = TodoRepository::count(&txn, to).await? as i32;

        for (offset, item) in items.iter().enumerate() {
            TodoRepository::insert(&txn, to, &item.task, count + offset as i32 + 1).await?;
        }

        txn.commit().await?;
        Ok(items.len() as u64)
    }

    /// Completed items in completion order.
    pub async fn items_done(&self, project_id: i32) -> Result<Vec<todo::Model>> {
        TodoRepository::get_done_for_project(&self.conn, project_id).await
    }

    /// The item to work on next.
    pub async fn next_item(&self, project_id: i32) -> Result<Option<todo::Model>> {
        TodoRepository::get_next_undone(&self.conn, project_id).await
    }

    /// Items that belong in the next commit message.
    pub async fn items_for_commit(&self, project_id: i32, amend: bool) -> Result<Vec<todo::Model>> {
        TodoRepository::get_for_commit(&self.conn, project_id, amend).await
    }

    /// Mark the items of [`Self::items_for_commit`] as committed.
    pub async fn set_items_committed(&self, project_id: i32, amend: bool) -> Result<u64> {
        let txn = self.conn.begin().await?;
        let updated = TodoRepository::set_committed(&txn, project_id, amend).await?;
        txn.commit().await?;
        Ok(updated)
    }
}
