//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same
//! query runs on a plain connection or inside a transaction.

pub mod project;
pub mod timesheet;
pub mod todo;

pub use project::{BranchSummary, ProjectRepository};
pub use timesheet::TimesheetRepository;
pub use todo::TodoRepository;
