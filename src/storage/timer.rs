//! Timer start/stop bookkeeping on top of the timesheet table.
//!
//! Only one timer runs at a time across all projects: the latest entry of
//! the whole timesheet decides whether it is running and where.

use anyhow::Result;
use thiserror::Error;

use crate::entities::timesheet::{self, ACTION_START, ACTION_STOP};
use crate::entities::project;
use crate::repositories::{ProjectRepository, TimesheetRepository};
use crate::storage::LocalStorage;
use crate::utils::datetime;

/// Timer state conflicts. Some commands treat these as warnings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer running in {folder} [{branch}]!")]
    RunningElsewhere { folder: String, branch: String },

    #[error("Timer running since {since}")]
    AlreadyRunning { since: String },

    #[error("Timer is not running.")]
    NotRunning,
}

/// Result of stopping the timer.
#[derive(Debug, Clone)]
pub struct StoppedTimer {
    pub project: project::Model,
    pub started: timesheet::Model,
    pub stopped: timesheet::Model,
}

impl StoppedTimer {
    /// Length of the interval that was just closed.
    pub fn duration_seconds(&self) -> u64 {
        datetime::seconds_between(&self.started.created_at, &self.stopped.created_at)
    }
}

impl LocalStorage {
    /// Latest timesheet entry, failing with [`TimerError::RunningElsewhere`]
    /// when the timer runs for a different project.
    pub async fn check_timer(&self, project_id: i32) -> Result<Option<timesheet::Model>> {
        let latest = TimesheetRepository::get_latest(&self.conn).await?;

        if let Some(entry) = &latest {
            if entry.is_start() && entry.project_id != project_id {
                let running = ProjectRepository::get_by_id(&self.conn, entry.project_id).await?;
                let (folder, branch) = running.map(|p| (p.folder, p.branch)).unwrap_or_default();
                return Err(TimerError::RunningElsewhere { folder, branch }.into());
            }
        }

        Ok(latest)
    }

    /// Start the timer for a project.
    pub async fn start_timer(&self, project_id: i32) -> Result<timesheet::Model> {
        if let Some(latest) = self.check_timer(project_id).await? {
            if latest.is_start() {
                return Err(TimerError::AlreadyRunning {
                    since: datetime::display_timestamp(&latest.created_at),
                }
                .into());
            }
        }

        let entry = TimesheetRepository::insert(&self.conn, project_id, ACTION_START).await?;
        log::info!("Timer started for project {}", project_id);
        Ok(entry)
    }

    /// Stop the timer wherever it runs.
    pub async fn stop_timer(&self) -> Result<StoppedTimer> {
        let started = match TimesheetRepository::get_latest(&self.conn).await? {
            Some(entry) if entry.is_start() => entry,
            _ => return Err(TimerError::NotRunning.into()),
        };

        let stopped = TimesheetRepository::insert(&self.conn, started.project_id, ACTION_STOP).await?;
        let project = ProjectRepository::get_by_id(&self.conn, started.project_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Project not found: {}", started.project_id))?;

        log::info!("Timer stopped for project {}", project.project_id);
        Ok(StoppedTimer {
            project,
            started,
            stopped,
        })
    }
}
