//! In-memory state of the list screen.
//!
//! The state is read from storage once per `run` and then only changes
//! through session transitions. Screen restarts keep it as is.

use crate::constants::{
    PROMPT_DELETE_ACTIVE, PROMPT_DELETE_QUEUE, PROMPT_POP_STASH, PROMPT_PUSH_STASH,
};
use crate::entities::todo;
use crate::shell::StashRef;

use super::layout;

/// The two lists shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Active,
    Queue,
}

impl ListKind {
    pub fn other(self) -> Self {
        match self {
            ListKind::Active => ListKind::Queue,
            ListKind::Queue => ListKind::Active,
        }
    }
}

/// What the screen is currently doing with input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Active,
    Queue,
    Confirming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i32,
    pub task: String,
    pub done: bool,
    pub committed: bool,
    pub stash: Option<StashRef>,
}

impl TodoItem {
    pub fn from_model(model: &todo::Model, stash: Option<StashRef>) -> Self {
        Self {
            id: model.todo_id,
            task: model.task.clone(),
            done: model.is_done(),
            committed: model.is_committed(),
            stash,
        }
    }
}

/// An operation waiting for y/n. The index points into the list the
/// request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    DeleteActiveItem(usize),
    DeleteQueueItem(usize),
    PushStash(usize),
    PopStash(usize),
}

impl PendingOp {
    pub fn prompt(self) -> &'static str {
        match self {
            PendingOp::DeleteActiveItem(_) => PROMPT_DELETE_ACTIVE,
            PendingOp::DeleteQueueItem(_) => PROMPT_DELETE_QUEUE,
            PendingOp::PushStash(_) => PROMPT_PUSH_STASH,
            PendingOp::PopStash(_) => PROMPT_POP_STASH,
        }
    }

    /// The list to return to once the operation is confirmed or cancelled.
    pub fn origin(self) -> ListKind {
        match self {
            PendingOp::DeleteQueueItem(_) => ListKind::Queue,
            _ => ListKind::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub prompt: String,
    pub op: PendingOp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    pub running: bool,
    pub elapsed_seconds: u64,
}

impl Timer {
    pub fn is_visible(&self) -> bool {
        self.running || self.elapsed_seconds > 0
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub body_height: u16,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub project_name: String,
    pub branch: String,
    pub active: Vec<TodoItem>,
    pub queue: Vec<TodoItem>,
    pub selected: ListKind,
    pub cursor: usize,
    pub pending: Option<PendingConfirmation>,
    pub error_message: Option<String>,
    pub show_help: bool,
    pub show_item_ids: bool,
    pub timer: Timer,
    pub viewport: Viewport,
    /// First body line on screen.
    pub scroll: usize,
}

impl SessionState {
    /// Starts on Active when it has items, else on Queue. The cursor goes to
    /// the first active item that is not done.
    pub fn new(
        project_name: impl Into<String>,
        branch: impl Into<String>,
        active: Vec<TodoItem>,
        queue: Vec<TodoItem>,
        timer: Timer,
    ) -> Self {
        let selected = if active.is_empty() {
            ListKind::Queue
        } else {
            ListKind::Active
        };
        let cursor = active.iter().position(|item| !item.done).unwrap_or(0);
        let cursor = if selected == ListKind::Active { cursor } else { 0 };

        Self {
            project_name: project_name.into(),
            branch: branch.into(),
            active,
            queue,
            selected,
            cursor,
            pending: None,
            error_message: None,
            show_help: false,
            show_item_ids: false,
            timer,
            viewport: Viewport::default(),
            scroll: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.pending.is_some() {
            return Mode::Confirming;
        }
        match self.selected {
            ListKind::Active => Mode::Active,
            ListKind::Queue => Mode::Queue,
        }
    }

    pub fn list(&self, kind: ListKind) -> &[TodoItem] {
        match kind {
            ListKind::Active => &self.active,
            ListKind::Queue => &self.queue,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<TodoItem> {
        match kind {
            ListKind::Active => &mut self.active,
            ListKind::Queue => &mut self.queue,
        }
    }

    pub fn selected_items(&self) -> &[TodoItem] {
        self.list(self.selected)
    }

    pub fn current_item(&self) -> Option<&TodoItem> {
        self.selected_items().get(self.cursor)
    }

    /// Whether the header shows a name line above the branch.
    pub fn has_custom_name(&self) -> bool {
        !self.project_name.is_empty() && self.project_name != self.branch
    }

    pub fn help_visible(&self) -> bool {
        self.show_help && self.pending.is_none()
    }

    /// Mode change to a list. Clears any pending confirmation and error.
    pub fn select(&mut self, list: ListKind) {
        self.selected = list;
        self.pending = None;
        self.error_message = None;
        self.refresh_viewport();
    }

    /// Mode change to Confirming.
    pub fn request_confirmation(&mut self, op: PendingOp) {
        self.pending = Some(PendingConfirmation {
            prompt: op.prompt().to_string(),
            op,
        });
        self.error_message = None;
        self.refresh_viewport();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.refresh_viewport();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.refresh_viewport();
    }

    pub fn refresh_viewport(&mut self) {
        self.viewport.body_height = layout::body_height(self);
    }

    /// Pull the cursor back into the selected list.
    pub fn clamp_cursor(&mut self) {
        let len = self.selected_items().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
