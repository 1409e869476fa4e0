use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A (repository folder, branch) pair owning a to-do list and a timesheet.
///
/// The queue of a repository is the project whose branch is
/// [`crate::constants::QUEUE_BRANCH`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub project_id: i32,
    pub folder: String,
    pub branch: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::todo::Entity")]
    Todos,
    #[sea_orm(has_many = "super::timesheet::Entity")]
    TimeEntries,
}

impl Related<super::todo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Todos.def()
    }
}

impl Related<super::timesheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
