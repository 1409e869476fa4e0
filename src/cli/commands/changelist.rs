//! Changelist command handler.

use anyhow::Result;

use crate::cli::AppContext;
use crate::entities::todo;
use crate::shell::pager::page;
use crate::storage::TodoStore;

/// Markdown list of the done items, or a task list of all items.
pub fn changelist(items: &[todo::Model], all: bool) -> String {
    let mut text = String::new();

    for item in items {
        let marker = match (all, item.is_done()) {
            (true, true) => "- [x] ",
            (true, false) => "- [ ] ",
            (false, true) => "- ",
            (false, false) => continue,
        };
        text.push_str(marker);
        text.push_str(&item.task);
        text.push('\n');
    }

    text
}

pub async fn run(ctx: &AppContext, all: bool, no_pager: bool) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    let items = ctx.storage.list_items(project_id).await?;
    if items.is_empty() {
        return Ok(());
    }

    let text = changelist(&items, all);
    if no_pager {
        print!("{text}");
    } else {
        page(&text, std::env::var("PAGER").ok().as_deref()).await;
    }
    Ok(())
}
