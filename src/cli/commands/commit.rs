//! Commit command handler.

use anyhow::Result;

use super::timer::warn_on_timer;
use crate::cli::AppContext;
use crate::entities::{project, todo};
use crate::shell::{GitShell, ScratchFile};
use crate::storage::TodoStore;

/// Commit message listing the items, headed by the project name as a git
/// comment when it differs from the branch.
pub fn commit_message(project: &project::Model, items: &[todo::Model]) -> String {
    let mut message = String::new();

    if project.name != project.branch {
        message.push('#');
        message.push_str(&project.name);
        message.push_str("\n\n");
    }

    for item in items {
        message.push_str("- ");
        message.push_str(&item.task);
        message.push('\n');
    }

    message
}

/// `git commit -eF <message file> [args...]`, then mark the items committed.
pub async fn run(ctx: &AppContext, args: &[String]) -> Result<()> {
    let amend = args.iter().any(|arg| arg == "--amend");
    let no_edit = args.iter().any(|arg| arg == "--no-edit");

    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;
    let project = ctx.storage.project(project_id).await?;

    warn_on_timer(&ctx.storage, project_id).await?;

    let git = GitShell::new();

    if amend && no_edit {
        git.commit(args).await?;
        ctx.storage.set_items_committed(project_id, true).await?;
        return Ok(());
    }

    let items = ctx.storage.items_for_commit(project_id, amend).await?;
    let scratch = ScratchFile::new(&commit_message(&project, &items))?;

    let mut git_args = vec!["-eF".to_string(), scratch.path().display().to_string()];
    git_args.extend_from_slice(args);
    git.commit(&git_args).await?;

    let committed = ctx.storage.set_items_committed(project_id, amend).await?;
    log::info!("Marked {} item(s) committed in project {}", committed, project_id);
    Ok(())
}
