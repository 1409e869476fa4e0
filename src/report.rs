//! Activity report aggregation.
//!
//! A report groups completed items, still-open items added in the period and
//! recorded time by repository and branch. Queue items are left out.
//! Timestamps stay in local database time internally and are converted to
//! UTC RFC 3339 when serialized.

use std::collections::HashMap;

use anyhow::Result;
use serde::{Serialize, Serializer};

use crate::constants::QUEUE_BRANCH;
use crate::entities::{project, timesheet, todo};
use crate::repositories::{ProjectRepository, TimesheetRepository, TodoRepository};
use crate::storage::LocalStorage;
use crate::utils::datetime;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(serialize_with = "as_utc")]
    pub from: String,
    #[serde(serialize_with = "as_utc")]
    pub to: String,
    pub repos: Vec<ReportRepo>,
    pub total_sec: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRepo {
    pub repo: String,
    pub projects: Vec<ReportProject>,
    pub total_sec: u64,
    #[serde(skip)]
    pub latest_update: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportProject {
    pub project_id: i32,
    pub branch: String,
    pub name: String,
    pub completed_items: Vec<ReportItem>,
    pub created_items: Vec<ReportItem>,
    pub time_entries: Vec<ReportTimeEntry>,
    pub total_sec: u64,
    pub timer_running: bool,
    #[serde(skip)]
    pub latest_update: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub id: i32,
    pub task: String,
    #[serde(serialize_with = "as_utc")]
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportTimeEntry {
    #[serde(serialize_with = "as_utc")]
    pub from: String,
    #[serde(serialize_with = "as_utc")]
    pub to: String,
    pub duration_sec: u64,
    pub running: bool,
}

fn as_utc<S>(ts: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match datetime::to_utc_rfc3339(ts) {
        Some(utc) => serializer.serialize_str(&utc),
        None => serializer.serialize_str(ts),
    }
}

impl ReportProject {
    fn new(project: &project::Model) -> Self {
        Self {
            project_id: project.project_id,
            branch: project.branch.clone(),
            name: project.name.clone(),
            completed_items: Vec::new(),
            created_items: Vec::new(),
            time_entries: Vec::new(),
            total_sec: 0,
            timer_running: false,
            latest_update: String::new(),
        }
    }

    fn touch(&mut self, ts: &str) {
        if ts > self.latest_update.as_str() {
            self.latest_update = ts.to_string();
        }
    }

    fn push_entry(&mut self, entry: ReportTimeEntry) {
        self.total_sec += entry.duration_sec;
        self.timer_running |= entry.running;
        self.touch(&entry.to);
        self.time_entries.push(entry);
    }

    /// Whether a custom name was given to the branch.
    pub fn has_custom_name(&self) -> bool {
        !self.name.is_empty() && self.name != self.branch
    }
}

/// Collects per-project rows while caching project lookups.
struct ReportBuilder<'a> {
    storage: &'a LocalStorage,
    folder_filter: Option<&'a str>,
    projects: HashMap<i32, Option<project::Model>>,
    rows: HashMap<i32, ReportProject>,
}

impl<'a> ReportBuilder<'a> {
    /// The report row of a project, or `None` when the project is filtered out.
    async fn row(&mut self, project_id: i32) -> Result<Option<&mut ReportProject>> {
        if !self.projects.contains_key(&project_id) {
            let folder_filter = self.folder_filter;
            let project = ProjectRepository::get_by_id(&self.storage.conn, project_id)
                .await?
                .filter(|p| p.branch != QUEUE_BRANCH)
                .filter(|p| folder_filter.map_or(true, |prefix| p.folder.starts_with(prefix)));
            self.projects.insert(project_id, project);
        }

        let Some(Some(project)) = self.projects.get(&project_id) else {
            return Ok(None);
        };

        Ok(Some(self.rows.entry(project_id).or_insert_with(|| ReportProject::new(project))))
    }

    async fn add_item(&mut self, item: todo::Model, time: String, completed: bool) -> Result<()> {
        if let Some(row) = self.row(item.project_id).await? {
            row.touch(&time);
            let entry = ReportItem {
                id: item.todo_id,
                task: item.task,
                time,
            };
            if completed {
                row.completed_items.push(entry);
            } else {
                row.created_items.push(entry);
            }
        }
        Ok(())
    }
}

/// Build the activity report for `[from, to]`, both in database timestamp
/// layout. `folder_filter` limits the report to repositories under a path.
pub async fn create_report(
    storage: &LocalStorage,
    from: &str,
    to: &str,
    folder_filter: Option<&str>,
) -> Result<Report> {
    let mut builder = ReportBuilder {
        storage,
        folder_filter,
        projects: HashMap::new(),
        rows: HashMap::new(),
    };

    for item in TodoRepository::get_completed_between(&storage.conn, from, to).await? {
        let time = item.done_at.clone().unwrap_or_default();
        builder.add_item(item, time, true).await?;
    }

    for item in TodoRepository::get_created_between(&storage.conn, from, to).await? {
        let time = item.created_at.clone();
        builder.add_item(item, time, false).await?;
    }

    // closed intervals: a stop paired with the start right before it
    let entries = TimesheetRepository::get_between(&storage.conn, from, to).await?;
    let mut previous: Option<&timesheet::Model> = None;
    for entry in &entries {
        if let Some(start) = previous.filter(|p| p.is_start() && p.project_id == entry.project_id) {
            if entry.is_stop() {
                if let Some(row) = builder.row(entry.project_id).await? {
                    row.push_entry(ReportTimeEntry {
                        from: start.created_at.clone(),
                        to: entry.created_at.clone(),
                        duration_sec: datetime::seconds_between(&start.created_at, &entry.created_at),
                        running: false,
                    });
                }
            }
        }
        previous = Some(entry);
    }

    // a timer still running at the end of the period
    if let Some(latest) = TimesheetRepository::get_latest(&storage.conn).await? {
        if latest.is_start() && latest.created_at.as_str() <= to {
            let start = if latest.created_at.as_str() < from { from.to_string() } else { latest.created_at.clone() };
            if let Some(row) = builder.row(latest.project_id).await? {
                row.push_entry(ReportTimeEntry {
                    duration_sec: datetime::seconds_between(&start, to),
                    from: start,
                    to: to.to_string(),
                    running: true,
                });
            }
        }
    }

    let mut repos: HashMap<String, ReportRepo> = HashMap::new();
    for (project_id, row) in builder.rows {
        let folder = builder
            .projects
            .get(&project_id)
            .and_then(|p| p.as_ref())
            .map(|p| p.folder.clone())
            .unwrap_or_default();

        let repo = repos.entry(folder.clone()).or_insert_with(|| ReportRepo {
            repo: folder,
            projects: Vec::new(),
            total_sec: 0,
            latest_update: String::new(),
        });
        repo.total_sec += row.total_sec;
        if row.latest_update > repo.latest_update {
            repo.latest_update = row.latest_update.clone();
        }
        repo.projects.push(row);
    }

    let mut repos: Vec<ReportRepo> = repos.into_values().collect();
    repos.sort_by(|a, b| b.latest_update.cmp(&a.latest_update).then_with(|| a.repo.cmp(&b.repo)));
    for repo in &mut repos {
        repo.projects
            .sort_by(|a, b| b.latest_update.cmp(&a.latest_update).then_with(|| a.branch.cmp(&b.branch)));
    }

    Ok(Report {
        from: from.to_string(),
        to: to.to_string(),
        total_sec: repos.iter().map(|r| r.total_sec).sum(),
        repos,
    })
}
