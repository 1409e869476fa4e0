//! Timesheet repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::timesheet;
use crate::utils::datetime;

/// Repository for timer start/stop entries.
pub struct TimesheetRepository;

impl TimesheetRepository {
    /// The most recent entry across all projects.
    pub async fn get_latest<C>(conn: &C) -> Result<Option<timesheet::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(timesheet::Entity::find()
            .order_by_desc(timesheet::Column::CreatedAt)
            .order_by_desc(timesheet::Column::TimesheetId)
            .one(conn)
            .await?)
    }

    /// All entries of a project in chronological order.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<timesheet::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(timesheet::Entity::find()
            .filter(timesheet::Column::ProjectId.eq(project_id))
            .order_by_asc(timesheet::Column::CreatedAt)
            .order_by_asc(timesheet::Column::TimesheetId)
            .all(conn)
            .await?)
    }

    /// Entries within `[from, to]` in chronological order.
    pub async fn get_between<C>(conn: &C, from: &str, to: &str) -> Result<Vec<timesheet::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(timesheet::Entity::find()
            .filter(timesheet::Column::CreatedAt.gte(from))
            .filter(timesheet::Column::CreatedAt.lte(to))
            .order_by_asc(timesheet::Column::CreatedAt)
            .order_by_asc(timesheet::Column::TimesheetId)
            .all(conn)
            .await?)
    }

    /// Record a start or stop entry stamped with the current time.
    pub async fn insert<C>(conn: &C, project_id: i32, action: i32) -> Result<timesheet::Model>
    where
        C: ConnectionTrait,
    {
        Self::insert_at(conn, project_id, action, &datetime::now_timestamp()).await
    }

    /// Record an entry with an explicit timestamp.
    pub async fn insert_at<C>(conn: &C, project_id: i32, action: i32, created_at: &str) -> Result<timesheet::Model>
    where
        C: ConnectionTrait,
    {
        let model = timesheet::ActiveModel {
            timesheet_id: ActiveValue::NotSet,
            project_id: ActiveValue::Set(project_id),
            action: ActiveValue::Set(action),
            created_at: ActiveValue::Set(created_at.to_string()),
        };

        Ok(model.insert(conn).await?)
    }
}
