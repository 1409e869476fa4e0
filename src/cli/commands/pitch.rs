//! Pitch command handler.

use anyhow::Result;

use super::items::edit_items;
use crate::cli::AppContext;
use crate::shell::GitShell;
use crate::storage::TodoStore;

/// Check out `target`, creating it when missing, and add items to it.
pub async fn run(
    ctx: &AppContext,
    target: &str,
    items: &[String],
    base: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let env = ctx.dir_env().await?;
    let git = GitShell::new();

    let create = !git.list_branches().await?.iter().any(|b| b == target);
    git.checkout_branch(target, base, create).await?;

    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, target)
        .await?;

    if let Some(name) = name {
        let name = if name.is_empty() { target } else { name };
        ctx.storage.update_project_name(project_id, name).await?;
    }

    let items = if items.is_empty() {
        edit_items(&env.editor).await?
    } else {
        items.to_vec()
    };
    ctx.storage.add_items(project_id, &items).await?;

    if items.is_empty() {
        git.status().await?;
    } else {
        println!("Added {} new to-do item(s) for {:?}.", items.len(), target);
    }
    Ok(())
}
