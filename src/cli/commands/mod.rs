pub mod changelist;
pub mod commit;
pub mod config;
pub mod items;
pub mod pitch;
pub mod report;
pub mod timer;
pub mod util;
