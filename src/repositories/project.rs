//! Project repository for database operations.

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::constants::QUEUE_BRANCH;
use crate::entities::{project, todo};

/// A branch of a repository together with the number of items it holds.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct BranchSummary {
    pub project_id: i32,
    pub branch: String,
    pub item_count: i64,
}

/// Repository for project-related database operations.
pub struct ProjectRepository;

impl ProjectRepository {
    /// Get a single project by id.
    pub async fn get_by_id<C>(conn: &C, project_id: i32) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find_by_id(project_id).one(conn).await?)
    }

    /// Find the project of a (folder, branch) pair.
    pub async fn find<C>(conn: &C, folder: &str, branch: &str) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::Folder.eq(folder))
            .filter(project::Column::Branch.eq(branch))
            .one(conn)
            .await?)
    }

    /// Get the project of a (folder, branch) pair, creating it when missing.
    /// New projects are named after their branch.
    pub async fn fetch_or_create<C>(conn: &C, folder: &str, branch: &str) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = Self::find(conn, folder, branch).await? {
            return Ok(existing);
        }

        let model = project::ActiveModel {
            project_id: ActiveValue::NotSet,
            folder: ActiveValue::Set(folder.to_string()),
            branch: ActiveValue::Set(branch.to_string()),
            name: ActiveValue::Set(branch.to_string()),
        };

        Ok(model.insert(conn).await?)
    }

    /// Rename a project.
    pub async fn update_name<C>(conn: &C, project_id: i32, name: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        project::Entity::update_many()
            .col_expr(project::Column::Name, Expr::value(name))
            .filter(project::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Branches of a repository that hold at least one item, the queue excluded.
    pub async fn branches<C>(conn: &C, folder: &str) -> Result<Vec<BranchSummary>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .select_only()
            .column(project::Column::ProjectId)
            .column(project::Column::Branch)
            .column_as(Expr::col((todo::Entity, todo::Column::TodoId)).count(), "item_count")
            .join(JoinType::InnerJoin, project::Relation::Todos.def())
            .filter(project::Column::Folder.eq(folder))
            .filter(project::Column::Branch.ne(QUEUE_BRANCH))
            .group_by(project::Column::ProjectId)
            .group_by(project::Column::Branch)
            .order_by_asc(project::Column::Branch)
            .into_model::<BranchSummary>()
            .all(conn)
            .await?)
    }

    /// Delete a project. Items and time entries go with it.
    pub async fn delete<C>(conn: &C, project_id: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        project::Entity::delete_by_id(project_id).exec(conn).await?;
        Ok(())
    }
}
