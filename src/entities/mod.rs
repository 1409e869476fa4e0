pub mod project;
pub mod timesheet;
pub mod todo;

pub use project::Entity as Project;
pub use timesheet::Entity as Timesheet;
pub use todo::Entity as Todo;
