//! Timer command handlers.

use anyhow::Result;
use crossterm::style::Stylize;

use crate::cli::AppContext;
use crate::storage::{LocalStorage, TimerError, TodoStore};
use crate::utils::datetime::{display_timestamp, format_seconds};

/// Print a warning when the timer runs for another project. Other
/// failures are returned.
pub(crate) async fn warn_on_timer(storage: &LocalStorage, project_id: i32) -> Result<()> {
    match storage.check_timer(project_id).await {
        Ok(_) => Ok(()),
        Err(e) => match e.downcast_ref::<TimerError>() {
            Some(timer_error) => {
                println!("{}\n", timer_error.to_string().yellow());
                Ok(())
            }
            None => Err(e),
        },
    }
}

pub async fn start(ctx: &AppContext) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    let entry = ctx.storage.start_timer(project_id).await?;
    println!("timer started on {}", display_timestamp(&entry.created_at));
    Ok(())
}

/// Stop the timer. Works outside of any repository.
pub async fn stop(ctx: &AppContext) -> Result<()> {
    let stopped = ctx.storage.stop_timer().await?;

    println!(
        "timer stopped on {}.\n\nrepository: {:?}\nbranch: {}\nduration: {}",
        display_timestamp(&stopped.stopped.created_at),
        stopped.project.folder,
        stopped.project.branch,
        format_seconds(stopped.duration_seconds()),
    );
    Ok(())
}
