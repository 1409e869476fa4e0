//! Scratch-file editing through the user's editor.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use tempfile::NamedTempFile;
use tokio::process::Command;

use super::{ShellError, TextEditor};
use crate::constants::SCRATCH_FILE_PREFIX;

/// Editor used when neither the config nor git name one.
pub const FALLBACK_EDITOR: &str = "vi";

/// A temporary file removed when dropped.
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    pub fn new(content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(SCRATCH_FILE_PREFIX)
            .tempfile()
            .context("Failed to create scratch file")?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .context("Failed to write scratch file")?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Open the file in `editor` and wait for it to exit. A `start_line`
    /// above zero asks the editor to put the cursor on that line.
    pub async fn edit(&self, editor: &str, start_line: usize) -> Result<(), ShellError> {
        let (program, args) = editor_command(editor, self.path(), start_line);
        log::debug!("Launching editor {} {:?}", program, args);

        let status = Command::new(&program)
            .args(&args)
            .status()
            .await
            .map_err(|source| ShellError::Spawn {
                command: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ShellError::Exited { command: program, status })
        }
    }

    pub fn read_all(&self) -> Result<String> {
        std::fs::read_to_string(self.path())
            .with_context(|| format!("Failed to read scratch file: {}", self.path().display()))
    }

    /// Read the file as a hyphen-delimited item list, see [`parse_items`].
    pub fn read_items(&self) -> Result<Vec<String>> {
        Ok(parse_items(&self.read_all()?))
    }
}

/// Program and arguments that open `path` in `editor`.
///
/// `editor` may carry its own arguments (`code --wait`). Known editors get
/// their start-line flag when `start_line` is above zero.
pub fn editor_command(editor: &str, path: &Path, start_line: usize) -> (String, Vec<String>) {
    let mut parts = editor.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    let extra: Vec<String> = parts.collect();
    let file = path.display().to_string();
    let file_at_line = format!("{}:{}", file, start_line);

    let name = Path::new(&program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.clone());

    let args = if !extra.is_empty() {
        let target = if name == "subl" && start_line > 0 { file_at_line } else { file };
        extra.into_iter().chain(std::iter::once(target)).collect()
    } else {
        match (name.as_str(), start_line > 0) {
            ("vi" | "vim" | "nvim", true) => vec!["+normal Ga".to_string(), file],
            ("nano" | "emacs", true) => vec![format!("+{}", start_line), file],
            ("subl", true) => vec!["-n".to_string(), "-w".to_string(), file_at_line],
            ("subl", false) => vec!["-n".to_string(), "-w".to_string(), file],
            _ => vec![file],
        }
    };

    (program, args)
}

/// Parse a hyphen-delimited item list.
///
/// A line starting with `-` opens a new item, a line starting with `#` is a
/// comment, and any other line continues the current item. Items are
/// trimmed and empty ones dropped.
pub fn parse_items(content: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        let item = current.trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
        current.clear();
    };

    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }

        if line.starts_with('-') {
            flush(&mut current);
            current.push_str(line.trim_start_matches(|c: char| c == '-' || c.is_whitespace()));
        } else {
            current.push_str(line);
        }
        current.push('\n');
    }
    flush(&mut current);

    items
}

/// Edits text in the user's editor after handing the terminal over.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    editor: String,
}

impl ExternalEditor {
    pub fn new(editor: impl Into<String>) -> Self {
        let editor = editor.into();
        Self {
            editor: if editor.trim().is_empty() { FALLBACK_EDITOR.to_string() } else { editor },
        }
    }

    pub fn command(&self) -> &str {
        &self.editor
    }
}

#[async_trait]
impl TextEditor for ExternalEditor {
    async fn edit_text(&self, initial: &str) -> Result<String> {
        // the editor needs a cooked terminal on the main screen
        disable_raw_mode()?;
        execute!(std::io::stdout(), LeaveAlternateScreen)?;

        let scratch = ScratchFile::new(initial)?;
        scratch.edit(&self.editor, 0).await?;
        Ok(scratch.read_all()?.trim().to_string())
    }
}
