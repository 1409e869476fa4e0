//! Report command handler.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Local};
use crossterm::style::{Color, Stylize};

use crate::cli::AppContext;
use crate::report::{create_report, Report};
use crate::shell::pager::page;
use crate::utils::datetime::{display_timestamp, format_seconds, format_timestamp, rfc3339_to_timestamp};

const ORANGE: Color = Color::Rgb { r: 255, g: 165, b: 0 };

pub struct ReportOptions {
    pub days: u32,
    /// Explicit (from, to) in RFC 3339, overriding `days`.
    pub range: Option<(String, String)>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub pager: bool,
}

pub async fn run(ctx: &AppContext, options: ReportOptions) -> Result<()> {
    let folder = match &options.dir {
        Some(dir) if dir.is_absolute() => Some(dir.display().to_string()),
        Some(dir) => Some(std::env::current_dir()?.join(dir).display().to_string()),
        None => None,
    };

    let (from, to, title) = match &options.range {
        Some((from, to)) => {
            let from = rfc3339_to_timestamp(from)
                .with_context(|| format!("Could not parse {from:?} as RFC3339 date and time string."))?;
            let to = rfc3339_to_timestamp(to)
                .with_context(|| format!("Could not parse {to:?} as RFC3339 date and time string."))?;
            if from >= to {
                anyhow::bail!("'from' time can't be larger than 'to' time.");
            }
            let title = format!(
                "Activity between\n{} and {}\n\n",
                display_timestamp(&from),
                display_timestamp(&to)
            );
            (from, to, title)
        }
        None => {
            let now = Local::now().naive_local();
            let from = format_timestamp(now - Duration::days(i64::from(options.days)));
            let title = format!("Activity since {}\n\n", display_timestamp(&from));
            (from, format_timestamp(now), title)
        }
    };

    let report = create_report(&ctx.storage, &from, &to, folder.as_deref()).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let text = render_report(&report, &title, !options.pager);
    if options.pager {
        page(&text, std::env::var("PAGER").ok().as_deref()).await;
    } else {
        print!("{text}");
    }
    Ok(())
}

fn paint(text: &str, color: Color, colors: bool) -> String {
    if colors {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Human readable report. `today` is the current date as `YYYY-MM-DD`.
pub fn render_report_on(report: &Report, title: &str, colors: bool, today: &str, yesterday: &str) -> String {
    let mut out = String::from(title);

    if report.repos.is_empty() {
        out.push_str("No data to display.\n");
        return out;
    }

    for repo in &report.repos {
        let _ = writeln!(out, "{}", paint(&repo.repo, Color::Magenta, colors));

        for project in &repo.projects {
            if project.has_custom_name() {
                let _ = writeln!(out, "{}", paint(&project.name, Color::Blue, colors));
                out.push_str(&paint(&project.branch, Color::DarkGrey, colors));
            } else {
                out.push_str(&paint(&project.branch, Color::Blue, colors));
            }

            let date = project.latest_update.get(..10).unwrap_or(&project.latest_update);
            let updated = if date == today {
                " • updated today".to_string()
            } else if date == yesterday {
                " • updated yesterday".to_string()
            } else {
                format!(" • updated on {date}")
            };
            let _ = writeln!(out, "{}", paint(&updated, Color::DarkGrey, colors));

            if !project.completed_items.is_empty() {
                out.push_str("\nCompleted:\n");
                for item in &project.completed_items {
                    let _ = writeln!(out, "  - {}", item.task);
                }
            }

            if !project.created_items.is_empty() {
                out.push_str("\nAdded:\n");
                for item in &project.created_items {
                    let _ = writeln!(out, "  - {}", item.task);
                }
            }

            if project.total_sec > 0 || project.timer_running {
                let _ = write!(out, "\nTime: {}", format_seconds(project.total_sec));
                if project.timer_running {
                    out.push_str(&paint(" (running)", ORANGE, colors));
                }
                out.push('\n');
            }

            out.push('\n');
        }

        if repo.total_sec > 0 && repo.projects.len() > 1 {
            let _ = writeln!(
                out,
                "{}\n",
                paint(&format!("Repo time: {}", format_seconds(repo.total_sec)), ORANGE, colors)
            );
        }
    }

    if report.total_sec > 0 {
        let _ = writeln!(
            out,
            "{}",
            paint(&format!("Total time: {}", format_seconds(report.total_sec)), Color::Green, colors)
        );
    }

    out
}

pub fn render_report(report: &Report, title: &str, colors: bool) -> String {
    let now = Local::now();
    let today = now.format("%Y-%m-%d").to_string();
    let yesterday = (now - Duration::days(1)).format("%Y-%m-%d").to_string();
    render_report_on(report, title, colors, &today, &yesterday)
}
