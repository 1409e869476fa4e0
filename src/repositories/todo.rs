//! To-do item repository for database operations.
//!
//! Positions are 1-based and kept contiguous per project: every operation
//! that removes an item from a project closes the gap it leaves.

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Statement,
};

use crate::entities::todo;
use crate::utils::datetime;

/// Repository for to-do item database operations.
pub struct TodoRepository;

impl TodoRepository {
    /// Get a single item by id.
    pub async fn get_by_id<C>(conn: &C, todo_id: i32) -> Result<Option<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find_by_id(todo_id).one(conn).await?)
    }

    /// Get an item by id, failing when it does not exist.
    pub async fn require<C>(conn: &C, todo_id: i32) -> Result<todo::Model>
    where
        C: ConnectionTrait,
    {
        Self::get_by_id(conn, todo_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("To-do item not found: {}", todo_id))
    }

    /// All items of a project in position order.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::ProjectId.eq(project_id))
            .order_by_asc(todo::Column::Position)
            .all(conn)
            .await?)
    }

    /// Completed items of a project in completion order.
    pub async fn get_done_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::ProjectId.eq(project_id))
            .filter(todo::Column::DoneAt.is_not_null())
            .order_by_asc(todo::Column::DoneAt)
            .order_by_asc(todo::Column::TodoId)
            .all(conn)
            .await?)
    }

    /// The first item of a project that is not done yet.
    pub async fn get_next_undone<C>(conn: &C, project_id: i32) -> Result<Option<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::ProjectId.eq(project_id))
            .filter(todo::Column::DoneAt.is_null())
            .order_by_asc(todo::Column::Position)
            .one(conn)
            .await?)
    }

    /// Number of items in a project.
    pub async fn count<C>(conn: &C, project_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::ProjectId.eq(project_id))
            .count(conn)
            .await?)
    }

    /// Insert an item at the given position without touching other rows.
    pub async fn insert<C>(conn: &C, project_id: i32, task: &str, position: i32) -> Result<todo::Model>
    where
        C: ConnectionTrait,
    {
        let model = todo::ActiveModel {
            todo_id: ActiveValue::NotSet,
            project_id: ActiveValue::Set(project_id),
            task: ActiveValue::Set(task.to_string()),
            position: ActiveValue::Set(position),
            created_at: ActiveValue::Set(datetime::now_timestamp()),
            done_at: ActiveValue::Set(None),
            committed_at: ActiveValue::Set(None),
        };

        Ok(model.insert(conn).await?)
    }

    /// Set or clear the completion timestamp.
    pub async fn set_done<C>(conn: &C, todo_id: i32, done: bool) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let done_at = done.then(datetime::now_timestamp);
        todo::Entity::update_many()
            .col_expr(todo::Column::DoneAt, Expr::value(done_at))
            .filter(todo::Column::TodoId.eq(todo_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Replace the task text.
    pub async fn update_task<C>(conn: &C, todo_id: i32, task: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        todo::Entity::update_many()
            .col_expr(todo::Column::Task, Expr::value(task))
            .filter(todo::Column::TodoId.eq(todo_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Move every item of a project below `position` one step up.
    pub async fn close_gap<C>(conn: &C, project_id: i32, position: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        todo::Entity::update_many()
            .col_expr(todo::Column::Position, Expr::col(todo::Column::Position).sub(1))
            .filter(todo::Column::ProjectId.eq(project_id))
            .filter(todo::Column::Position.gt(position))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Delete a single row. Callers are expected to close the gap.
    pub async fn delete<C>(conn: &C, todo_id: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        todo::Entity::delete_by_id(todo_id).exec(conn).await?;
        Ok(())
    }

    /// Move the item at position `from` to position `to` inside its project,
    /// shifting the items in between. Runs as a single statement.
    pub async fn reposition<C>(conn: &C, todo_id: i32, from: i32, to: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let sql = r"
            UPDATE todo SET position = CASE
                WHEN todo_id = ? THEN ?
                WHEN position >= ? AND position < ? THEN position + 1
                WHEN position > ? AND position <= ? THEN position - 1
                ELSE position
            END
            WHERE project_id = (SELECT project_id FROM todo WHERE todo_id = ?)
        ";

        conn.execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            sql,
            [
                todo_id.into(),
                to.into(),
                to.into(),
                from.into(),
                from.into(),
                to.into(),
                todo_id.into(),
            ],
        ))
        .await?;
        Ok(())
    }

    /// Reassign an item to another project at the given position. The item
    /// counts as created at the moment of the move.
    pub async fn reassign<C>(conn: &C, todo_id: i32, project_id: i32, position: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        todo::Entity::update_many()
            .col_expr(todo::Column::ProjectId, Expr::value(project_id))
            .col_expr(todo::Column::Position, Expr::value(position))
            .col_expr(todo::Column::CreatedAt, Expr::value(datetime::now_timestamp()))
            .filter(todo::Column::TodoId.eq(todo_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Timestamp of the most recent commit recorded for a project.
    pub async fn latest_commit_timestamp<C>(conn: &C, project_id: i32) -> Result<Option<String>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::ProjectId.eq(project_id))
            .filter(todo::Column::CommittedAt.is_not_null())
            .order_by_desc(todo::Column::CommittedAt)
            .one(conn)
            .await?
            .and_then(|t| t.committed_at))
    }

    /// Done items that go into the next commit message. With `amend`, items
    /// recorded by the previous commit are included again.
    pub async fn get_for_commit<C>(conn: &C, project_id: i32, amend: bool) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        let condition = Self::commit_condition(conn, project_id, amend).await?;
        Ok(todo::Entity::find()
            .filter(condition)
            .order_by_asc(todo::Column::DoneAt)
            .order_by_asc(todo::Column::TodoId)
            .all(conn)
            .await?)
    }

    /// Stamp the items selected by [`Self::get_for_commit`] as committed.
    pub async fn set_committed<C>(conn: &C, project_id: i32, amend: bool) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let condition = Self::commit_condition(conn, project_id, amend).await?;
        let result = todo::Entity::update_many()
            .col_expr(todo::Column::CommittedAt, Expr::value(datetime::now_timestamp()))
            .filter(condition)
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn commit_condition<C>(conn: &C, project_id: i32, amend: bool) -> Result<Condition>
    where
        C: ConnectionTrait,
    {
        let mut pending = Condition::any().add(todo::Column::CommittedAt.is_null());
        if amend {
            if let Some(latest) = Self::latest_commit_timestamp(conn, project_id).await? {
                pending = pending.add(todo::Column::CommittedAt.eq(latest));
            }
        }

        Ok(Condition::all()
            .add(todo::Column::ProjectId.eq(project_id))
            .add(todo::Column::DoneAt.is_not_null())
            .add(pending))
    }

    /// Items completed within `[from, to]`.
    pub async fn get_completed_between<C>(conn: &C, from: &str, to: &str) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::DoneAt.gte(from))
            .filter(todo::Column::DoneAt.lte(to))
            .order_by_desc(todo::Column::DoneAt)
            .all(conn)
            .await?)
    }

    /// Items created within `[from, to]` that are still open.
    pub async fn get_created_between<C>(conn: &C, from: &str, to: &str) -> Result<Vec<todo::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(todo::Entity::find()
            .filter(todo::Column::CreatedAt.gte(from))
            .filter(todo::Column::CreatedAt.lte(to))
            .filter(todo::Column::DoneAt.is_null())
            .order_by_desc(todo::Column::CreatedAt)
            .all(conn)
            .await?)
    }
}
