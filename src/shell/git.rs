use std::collections::HashMap;
use std::io::ErrorKind;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;

use super::stash::{parse_stash_list, stash_label, StashRef};
use super::{ShellError, StashShell};

/// Repository context of the current working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEnv {
    /// Top level folder of the repository.
    pub project_dir: String,
    pub branch: String,
    /// Editor configured for git, empty when none is set.
    pub editor: String,
}

impl DirEnv {
    /// Detect the context of the current directory with the default git.
    pub async fn detect() -> Result<Self, ShellError> {
        GitShell::new().dir_env().await
    }
}

/// Thin wrapper around the `git` binary.
#[derive(Debug, Clone)]
pub struct GitShell {
    program: String,
}

impl Default for GitShell {
    fn default() -> Self {
        Self::new()
    }
}

impl GitShell {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn describe(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    /// Run git with captured output and return its stdout.
    async fn output(&self, args: &[&str]) -> Result<String, ShellError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ShellError::GitMissing,
                _ => ShellError::Spawn {
                    command: Self::describe(args),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(ShellError::CommandFailed {
                command: Self::describe(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git attached to the terminal.
    async fn interactive(&self, args: &[&str]) -> Result<(), ShellError> {
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ShellError::GitMissing,
                _ => ShellError::Spawn {
                    command: Self::describe(args),
                    source,
                },
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ShellError::Exited {
                command: Self::describe(args),
                status,
            })
        }
    }

    /// Detect the repository folder, current branch and git editor.
    pub async fn dir_env(&self) -> Result<DirEnv, ShellError> {
        let rev = self.output(&["rev-parse", "--show-toplevel", "--abbrev-ref", "HEAD"]).await?;
        let mut lines = rev.lines().map(str::trim);
        let project_dir = lines.next().unwrap_or_default().to_string();
        let branch = lines.next().unwrap_or_default().to_string();

        // an unset editor is not an error
        let editor = self
            .output(&["var", "GIT_EDITOR"])
            .await
            .map(|e| e.trim().to_string())
            .unwrap_or_default();

        log::debug!("Detected repository {} on branch {}", project_dir, branch);
        Ok(DirEnv {
            project_dir,
            branch,
            editor,
        })
    }

    /// Local branch names.
    pub async fn list_branches(&self) -> Result<Vec<String>, ShellError> {
        let output = self.output(&["--no-pager", "branch", "--format=%(refname:short)"]).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Check out `name`, creating it from `base` (or HEAD) when `create` is set.
    pub async fn checkout_branch(&self, name: &str, base: Option<&str>, create: bool) -> Result<(), ShellError> {
        let mut args = vec!["checkout"];
        if create {
            args.push("-b");
        }
        args.push(name);
        if let Some(base) = base.filter(|b| create && !b.is_empty()) {
            args.push(base);
        }
        self.interactive(&args).await
    }

    /// Print `git status` to the terminal.
    pub async fn status(&self) -> Result<(), ShellError> {
        self.interactive(&["status"]).await
    }

    /// Run `git commit` with extra arguments, attached to the terminal.
    pub async fn commit(&self, args: &[String]) -> Result<(), ShellError> {
        let mut full: Vec<&str> = vec!["commit"];
        full.extend(args.iter().map(String::as_str));
        self.interactive(&full).await
    }
}

#[async_trait]
impl StashShell for GitShell {
    async fn list_stash_references(&self) -> Result<HashMap<i32, StashRef>> {
        let output = self.output(&["--no-pager", "stash", "list", "--date=local"]).await?;
        Ok(parse_stash_list(&output))
    }

    async fn push_stash(&self, todo_id: i32) -> Result<()> {
        let label = stash_label(todo_id);
        self.output(&["stash", "push", "-m", &label, "--include-untracked"]).await?;
        log::info!("Pushed stash {}", label);
        Ok(())
    }

    async fn pop_stash(&self, reference: &str) -> Result<()> {
        self.output(&["stash", "pop", reference]).await?;
        log::info!("Popped stash {}", reference);
        Ok(())
    }
}
