//! Item command handlers: the list screen, add, queue, what, done and name.

use std::sync::Arc;

use anyhow::Result;
use crossterm::style::Stylize;

use super::timer::warn_on_timer;
use crate::cli::AppContext;
use crate::constants::{ALL_DONE, ITEMS_TEMPLATE, ITEMS_TEMPLATE_START_LINE, QUEUE_BRANCH};
use crate::shell::{ExternalEditor, GitShell, ScratchFile};
use crate::storage::TodoStore;
use crate::ui::{run_list_ui, ListSession};

/// Let the user write several items in the editor.
pub(crate) async fn edit_items(editor: &str) -> Result<Vec<String>> {
    let scratch = ScratchFile::new(ITEMS_TEMPLATE)?;
    scratch.edit(editor, ITEMS_TEMPLATE_START_LINE).await?;
    scratch.read_items()
}

/// Open the list, or ask for the first items when the branch has none.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    if ctx.storage.item_count(project_id).await? == 0 {
        let items = edit_items(&env.editor).await?;
        return ctx.storage.add_items(project_id, &items).await;
    }

    let mut session = ListSession::load(
        Arc::new(ctx.storage.clone()),
        Arc::new(GitShell::new()),
        Arc::new(ExternalEditor::new(env.editor.clone())),
        &env.project_dir,
        &env.branch,
        &ctx.config.ui,
    )
    .await?;

    run_list_ui(&mut session, &ctx.config.ui).await
}

pub async fn add(ctx: &AppContext, words: &[String], top: bool) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    warn_on_timer(&ctx.storage, project_id).await?;

    if words.is_empty() {
        let items = edit_items(&env.editor).await?;
        ctx.storage.add_items(project_id, &items).await?;
        println!("Added {} item(s) to {:?}", items.len(), env.branch);
        return Ok(());
    }

    let item = words.join(" ");
    let (todo_id, position) = ctx.storage.add_item(project_id, &item).await?;
    if top {
        ctx.storage.reposition(todo_id, position, 1).await?;
    }
    println!("Added to-do item {:?} to {:?}", item, env.branch);
    Ok(())
}

pub async fn queue(ctx: &AppContext, words: &[String]) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, QUEUE_BRANCH)
        .await?;

    let items = if words.is_empty() {
        edit_items(&env.editor).await?
    } else {
        vec![words.join(" ")]
    };

    ctx.storage.add_items(project_id, &items).await?;
    println!("Queued {} item(s)", items.len());
    Ok(())
}

pub async fn what(ctx: &AppContext) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;
    let project = ctx.storage.project(project_id).await?;

    println!("On: {}\n", project.name);
    match ctx.storage.next_item(project_id).await? {
        Some(item) => println!("What to do: {}", item.task),
        None => println!("{ALL_DONE}"),
    }
    Ok(())
}

pub async fn done(ctx: &AppContext) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    warn_on_timer(&ctx.storage, project_id).await?;

    let Some(item) = ctx.storage.next_item(project_id).await? else {
        println!("{}", ALL_DONE.green());
        return Ok(());
    };
    ctx.storage.set_done(item.todo_id, true).await?;
    println!("{}\n", item.task.as_str().crossed_out());

    match ctx.storage.next_item(project_id).await? {
        Some(next) => println!("Up next: {}", next.task),
        None => println!("{}", ALL_DONE.green()),
    }
    Ok(())
}

pub async fn name(ctx: &AppContext, name: Option<&str>) -> Result<()> {
    let env = ctx.dir_env().await?;
    let project_id = ctx
        .storage
        .fetch_or_create_project(&env.project_dir, &env.branch)
        .await?;

    match name {
        None => {
            let project = ctx.storage.project(project_id).await?;
            println!("{}", project.name);
        }
        Some(name) => {
            ctx.storage.update_project_name(project_id, name).await?;
            println!("name set to {name:?}");
        }
    }
    Ok(())
}
