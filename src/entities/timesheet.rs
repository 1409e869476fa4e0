use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ACTION_START: i32 = 1;
pub const ACTION_STOP: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub timesheet_id: i32,
    pub project_id: i32,
    /// [`ACTION_START`] or [`ACTION_STOP`].
    pub action: i32,
    pub created_at: String,
}

impl Model {
    pub fn is_start(&self) -> bool {
        self.action == ACTION_START
    }

    pub fn is_stop(&self) -> bool {
        self.action == ACTION_STOP
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
