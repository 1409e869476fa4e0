//! Local storage module for to-do lists and timesheets
//!
//! This module provides database operations using SeaORM for:
//! - Projects (a repository folder and branch pair)
//! - To-do items and their ordering
//! - Timer start/stop entries
//!
//! The list screen talks to storage only through the [`TodoStore`] trait,
//! so it can run against any implementation.

pub mod db;
pub mod projects;
pub mod timer;
pub mod todos;

use anyhow::Result;
use async_trait::async_trait;

use crate::entities::{project, timesheet, todo};

pub use db::LocalStorage;
pub use timer::{StoppedTimer, TimerError};

/// Storage operations needed by the interactive list and the item commands.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Id of the project for (folder, branch), created on first use.
    async fn fetch_or_create_project(&self, folder: &str, branch: &str) -> Result<i32>;

    async fn project(&self, project_id: i32) -> Result<project::Model>;

    /// Items of a project in position order.
    async fn list_items(&self, project_id: i32) -> Result<Vec<todo::Model>>;

    /// Append an item, returning its id and 1-based position.
    async fn add_item(&self, project_id: i32, task: &str) -> Result<(i32, i32)>;

    /// Append several items in order.
    async fn add_items(&self, project_id: i32, tasks: &[String]) -> Result<()>;

    async fn item_count(&self, project_id: i32) -> Result<u64>;

    async fn delete_item(&self, todo_id: i32) -> Result<()>;

    async fn set_done(&self, todo_id: i32, done: bool) -> Result<()>;

    async fn update_task(&self, todo_id: i32, task: &str) -> Result<()>;

    /// Move an item from 1-based position `from` to `to` within its project.
    async fn reposition(&self, todo_id: i32, from: i32, to: i32) -> Result<()>;

    /// Append an item to the end of another project.
    async fn move_to_project(&self, todo_id: i32, project_id: i32) -> Result<()>;

    async fn latest_time_entry(&self) -> Result<Option<timesheet::Model>>;

    /// Recorded seconds for a project, including a running timer.
    async fn project_time_seconds(&self, project_id: i32) -> Result<u64>;
}
