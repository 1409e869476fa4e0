//! Branch data maintenance.

use std::collections::{BTreeSet, HashSet};
use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::cli::AppContext;
use crate::shell::GitShell;
use crate::storage::TodoStore;

/// Branches with data. Branches git no longer knows are printed in red.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let env = ctx.dir_env().await?;
    let summaries = ctx.storage.branches(&env.project_dir).await?;
    let existing: HashSet<String> = GitShell::new().list_branches().await?.into_iter().collect();

    for summary in summaries {
        let line = format!("{} ({})", summary.branch, summary.item_count);
        if existing.contains(&summary.branch) {
            println!("{line}");
        } else {
            println!("{}", line.red());
        }
    }
    Ok(())
}

/// Read a single key and tell whether it was y or Y.
fn ask(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    enable_raw_mode()?;
    let answer = read_yes();
    disable_raw_mode()?;
    println!();

    answer
}

fn read_yes() -> Result<bool> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')));
            }
        }
    }
}

pub async fn delete(ctx: &AppContext, branches: &[String], yes: bool) -> Result<()> {
    let env = ctx.dir_env().await?;
    let mut pending: BTreeSet<&str> = branches.iter().map(String::as_str).collect();

    for summary in ctx.storage.branches(&env.project_dir).await? {
        if !pending.remove(summary.branch.as_str()) {
            continue;
        }
        if !yes && !ask(&format!("Delete {:?}? (y/n) ", summary.branch))? {
            continue;
        }

        print!("Deleting {:?}...", summary.branch);
        match ctx.storage.delete_project(summary.project_id).await {
            Ok(()) => println!("ok"),
            Err(e) => println!("{e:#}"),
        }
    }

    for branch in pending {
        println!("Not found: {branch:?}");
    }

    print!("Optimizing...");
    match ctx.storage.vacuum().await {
        Ok(()) => println!("ok"),
        Err(e) => println!("{e:#}"),
    }
    Ok(())
}

pub async fn copy_items(ctx: &AppContext, from: &str, to: &str) -> Result<()> {
    let env = ctx.dir_env().await?;
    let from_id = ctx.storage.fetch_or_create_project(&env.project_dir, from).await?;
    let to_id = ctx.storage.fetch_or_create_project(&env.project_dir, to).await?;

    let copied = ctx.storage.copy_project_items(from_id, to_id).await?;
    let count = ctx.storage.item_count(to_id).await?;
    println!("Copied items: {copied}\nNew count: {count}");
    Ok(())
}
