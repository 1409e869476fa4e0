//! External programs: git, the user's editor and the pager.
//!
//! The list screen only sees the [`StashShell`] and [`TextEditor`] traits;
//! [`GitShell`] and [`ExternalEditor`] are the real implementations.

pub mod editor;
pub mod git;
pub mod pager;
pub mod stash;

use std::collections::HashMap;
use std::process::ExitStatus;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

pub use editor::{parse_items, ExternalEditor, ScratchFile};
pub use git::{DirEnv, GitShell};
pub use stash::{parse_stash_list, stash_label, StashRef};

/// Failures of external programs.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("git must be installed in order to use the application.")]
    GitMissing,

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("`{command}` exited with {status}")]
    Exited { command: String, status: ExitStatus },

    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stash operations keyed by to-do item id.
#[async_trait]
pub trait StashShell: Send + Sync {
    /// Stashes created for items, by item id.
    async fn list_stash_references(&self) -> Result<HashMap<i32, StashRef>>;

    /// Stash all changes, untracked files included, under the item's label.
    async fn push_stash(&self, todo_id: i32) -> Result<()>;

    /// Apply and drop a stash by reference, e.g. `stash@{Tue Jan 14 19:13:06 2025}`.
    async fn pop_stash(&self, reference: &str) -> Result<()>;
}

/// Blocking text editing that takes over the terminal.
#[async_trait]
pub trait TextEditor: Send + Sync {
    /// Edit `initial` and return the saved text.
    async fn edit_text(&self, initial: &str) -> Result<String>;
}
