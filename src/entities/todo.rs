use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub todo_id: i32,
    pub project_id: i32,
    pub task: String,
    /// 1-based position inside the owning project.
    pub position: i32,
    pub created_at: String,
    pub done_at: Option<String>,
    pub committed_at: Option<String>,
}

impl Model {
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }

    pub fn is_committed(&self) -> bool {
        self.committed_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::ProjectId",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
