use anyhow::Result;
use async_trait::async_trait;
use sea_orm::TransactionTrait;

use crate::entities::{project, timesheet, todo};
use crate::repositories::{ProjectRepository, TimesheetRepository, TodoRepository};
use crate::storage::{LocalStorage, TodoStore};
use crate::utils::datetime;

#[async_trait]
impl TodoStore for LocalStorage {
    async fn fetch_or_create_project(&self, folder: &str, branch: &str) -> Result<i32> {
        Ok(ProjectRepository::fetch_or_create(&self.conn, folder, branch).await?.project_id)
    }

    async fn project(&self, project_id: i32) -> Result<project::Model> {
        ProjectRepository::get_by_id(&self.conn, project_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Project not found: {}", project_id))
    }

    async fn list_items(&self, project_id: i32) -> Result<Vec<todo::Model>> {
        TodoRepository::get_for_project(&self.conn, project_id).await
    }

    async fn add_item(&self, project_id: i32, task: &str) -> Result<(i32, i32)> {
        let txn = self.conn.begin().await?;
        let position = TodoRepository::count(&txn, project_id).await? as i32 + 1;
        let item = TodoRepository::insert(&txn, project_id, task, position).await?;
        txn.commit().await?;
        Ok((item.todo_id, position))
    }

    async fn add_items(&self, project_id: i32, tasks: &[String]) -> Result<()> {
        let txn = self.conn.begin().await?;
        let count = TodoRepository::count(&txn, project_id).await? as i32;
        for (offset, task) in tasks.iter().enumerate() {
            TodoRepository::insert(&txn, project_id, task, count + offset as i32 + 1).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn item_count(&self, project_id: i32) -> Result<u64> {
        TodoRepository::count(&self.conn, project_id).await
    }

    async fn delete_item(&self, todo_id: i32) -> Result<()> {
        let txn = self.conn.begin().await?;
        let item = TodoRepository::require(&txn, todo_id).await?;
        TodoRepository::delete(&txn, todo_id).await?;
        TodoRepository::close_gap(&txn, item.project_id, item.position).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn set_done(&self, todo_id: i32, done: bool) -> Result<()> {
        TodoRepository::set_done(&self.conn, todo_id, done).await
    }

    async fn update_task(&self, todo_id: i32, task: &str) -> Result<()> {
        TodoRepository::update_task(&self.conn, todo_id, task).await
    }

    async fn reposition(&self, todo_id: i32, from: i32, to: i32) -> Result<()> {
        TodoRepository::reposition(&self.conn, todo_id, from, to).await
    }

    async fn move_to_project(&self, todo_id: i32, project_id: i32) -> Result<()> {
        let txn = self.conn.begin().await?;
        let item = TodoRepository::require(&txn, todo_id).await?;
        let position = TodoRepository::count(&txn, project_id).await? as i32 + 1;
        TodoRepository::close_gap(&txn, item.project_id, item.position).await?;
        TodoRepository::reassign(&txn, todo_id, project_id, position).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn latest_time_entry(&self) -> Result<Option<timesheet::Model>> {
        TimesheetRepository::get_latest(&self.conn).await
    }

    async fn project_time_seconds(&self, project_id: i32) -> Result<u64> {
        let entries = TimesheetRepository::get_for_project(&self.conn, project_id).await?;
        Ok(tracked_seconds(&entries, &datetime::now_timestamp()))
    }
}

/// Sum the closed start/stop intervals of a chronological entry list. A
/// trailing start counts up to `now`.
pub fn tracked_seconds(entries: &[timesheet::Model], now: &str) -> u64 {
    let mut total = 0;
    let mut started: Option<&str> = None;

    for entry in entries {
        if entry.is_start() {
            started.get_or_insert(entry.created_at.as_str());
        } else if let Some(from) = started.take() {
            total += datetime::seconds_between(from, &entry.created_at);
        }
    }

    if let Some(from) = started {
        total += datetime::seconds_between(from, now);
    }

    total
}
