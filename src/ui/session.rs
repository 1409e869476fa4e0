//! The interactive list session: key map, transitions and collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use super::core::{Action, Component, EventType, ScreenControl};
use super::renderer::render_ui;
use super::state::{ListKind, PendingOp, SessionState, Timer, TodoItem};
use crate::config::UiConfig;
use crate::constants::QUEUE_BRANCH;
use crate::shell::{StashShell, TextEditor};
use crate::storage::TodoStore;

/// One `run` of the list screen. Outlives screen restarts.
pub struct ListSession {
    store: Arc<dyn TodoStore>,
    stash: Arc<dyn StashShell>,
    editor: Arc<dyn TextEditor>,
    project_id: i32,
    queue_project_id: i32,
    state: SessionState,
    control: Option<ScreenControl>,
}

impl ListSession {
    /// Read items, timer status and stash references for (folder, branch).
    pub async fn load(
        store: Arc<dyn TodoStore>,
        stash: Arc<dyn StashShell>,
        editor: Arc<dyn TextEditor>,
        folder: &str,
        branch: &str,
        ui: &UiConfig,
    ) -> Result<Self> {
        let project_id = store.fetch_or_create_project(folder, branch).await?;
        let queue_project_id = store.fetch_or_create_project(folder, QUEUE_BRANCH).await?;
        let project = store.project(project_id).await?;

        let mut stashes = match stash.list_stash_references().await {
            Ok(stashes) => stashes,
            Err(e) => {
                log::warn!("Could not list stashes: {e:#}");
                HashMap::new()
            }
        };

        let active = store
            .list_items(project_id)
            .await?
            .iter()
            .map(|model| TodoItem::from_model(model, stashes.remove(&model.todo_id)))
            .collect();
        let queue = store
            .list_items(queue_project_id)
            .await?
            .iter()
            .map(|model| TodoItem::from_model(model, stashes.remove(&model.todo_id)))
            .collect();

        let running = store
            .latest_time_entry()
            .await?
            .is_some_and(|entry| entry.is_start() && entry.project_id == project_id);
        let timer = Timer {
            running,
            elapsed_seconds: store.project_time_seconds(project_id).await?,
        };

        let mut state = SessionState::new(project.name, project.branch, active, queue, timer);
        state.show_help = ui.show_help;
        state.show_item_ids = ui.show_item_ids;

        log::debug!(
            "Loaded list for {folder} [{branch}]: {} items, {} queued",
            state.active.len(),
            state.queue.len()
        );

        Ok(Self {
            store,
            stash,
            editor,
            project_id,
            queue_project_id,
            state,
            control: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Hand over the signals of a new screen instance.
    pub fn attach_screen(&mut self, control: ScreenControl) {
        self.control = Some(control);
    }

    fn handle_global_key(&self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        // input is suspended while a confirmation is pending
        if self.state.pending.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if ctrl => Action::SwapUp,
            KeyCode::Down | KeyCode::Char('j') if ctrl => Action::SwapDown,
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Action::CursorUp,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Action::CursorDown,
            KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleDone,
            KeyCode::Char('t') | KeyCode::Char('T') => Action::PromoteToTop,
            KeyCode::Char('d') | KeyCode::Char('D') => Action::RequestDelete,
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
            KeyCode::Char('e') | KeyCode::Char('E') => Action::Edit,
            KeyCode::Char('m') | KeyCode::Char('M') => Action::MoveBetweenLists,
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => Action::ToggleHelp,
            KeyCode::Char('#') => Action::ToggleItemIds,
            KeyCode::Char('s') | KeyCode::Char('S') => Action::RequestPushStash,
            KeyCode::Char('p') | KeyCode::Char('P') => Action::RequestPopStash,
            _ => Action::None,
        }
    }

    /// Process one event from the screen driver.
    pub async fn handle_event(&mut self, event: EventType) -> Action {
        match event {
            EventType::Key(key) => {
                let action = self.handle_global_key(key);
                self.update(action).await
            }
            EventType::Resize(width, height) => {
                self.state.resize(width, height);
                Action::None
            }
            EventType::Tick => {
                self.state.timer.tick();
                Action::None
            }
        }
    }

    /// Apply an action. Returns [`Action::Bell`] when the action is refused.
    pub async fn update(&mut self, action: Action) -> Action {
        if self.state.pending.is_some()
            && !matches!(action, Action::Confirm | Action::Cancel | Action::Quit | Action::None)
        {
            return Action::None;
        }

        let result = match action {
            Action::CursorUp => {
                self.cursor_up();
                Ok(())
            }
            Action::CursorDown => {
                self.cursor_down();
                Ok(())
            }
            Action::ToggleDone => self.toggle_done().await,
            Action::PromoteToTop => self.promote_to_top().await,
            Action::SwapUp => self.swap_up().await,
            Action::SwapDown => self.swap_down().await,
            Action::Edit => self.edit().await,
            Action::MoveBetweenLists => self.move_between_lists().await,
            Action::RequestDelete => return self.request_delete(),
            Action::RequestPushStash => return self.request_push_stash(),
            Action::RequestPopStash => {
                self.request_pop_stash();
                Ok(())
            }
            Action::Confirm => self.confirm().await,
            Action::Cancel => {
                if let Some(pending) = self.state.pending.take() {
                    self.state.select(pending.op.origin());
                }
                Ok(())
            }
            Action::ToggleHelp => {
                self.state.toggle_help();
                Ok(())
            }
            Action::ToggleItemIds => {
                self.state.show_item_ids = !self.state.show_item_ids;
                Ok(())
            }
            Action::Quit => {
                if let Some(control) = self.control.as_mut() {
                    control.request_exit();
                }
                return Action::Quit;
            }
            Action::Bell | Action::None => Ok(()),
        };

        if let Err(e) = result {
            log::warn!("{action:?} failed: {e:#}");
            self.state.set_error(format!("{e:#}"));
        }
        Action::None
    }

    fn cursor_down(&mut self) {
        let len = self.state.selected_items().len();
        if self.state.cursor + 1 < len {
            self.state.cursor += 1;
            return;
        }

        let other = self.state.selected.other();
        if !self.state.list(other).is_empty() {
            self.state.select(other);
            self.state.cursor = 0;
        }
    }

    fn cursor_up(&mut self) {
        if self.state.cursor > 0 {
            self.state.cursor -= 1;
            return;
        }

        let other = self.state.selected.other();
        let len = self.state.list(other).len();
        if len > 0 {
            self.state.select(other);
            self.state.cursor = len - 1;
        }
    }

    /// The item under the cursor, only when the to-do list is selected.
    fn current_active(&self) -> Option<&TodoItem> {
        if self.state.selected != ListKind::Active {
            return None;
        }
        self.state.current_item()
    }

    async fn toggle_done(&mut self) -> Result<()> {
        let Some(item) = self.current_active() else {
            return Ok(());
        };
        let (todo_id, done) = (item.id, !item.done);

        self.store.set_done(todo_id, done).await?;
        let cursor = self.state.cursor;
        self.state.active[cursor].done = done;
        Ok(())
    }

    /// Move the item at the cursor to `to` (0-based) and follow it.
    async fn move_active(&mut self, to: usize) -> Result<()> {
        let Some(todo_id) = self.current_active().map(|item| item.id) else {
            return Ok(());
        };
        let from = self.state.cursor;
        if to == from || to >= self.state.active.len() {
            return Ok(());
        }

        self.store
            .reposition(todo_id, position(from), position(to))
            .await?;
        let item = self.state.active.remove(from);
        self.state.active.insert(to, item);
        self.state.cursor = to;
        Ok(())
    }

    async fn promote_to_top(&mut self) -> Result<()> {
        self.move_active(0).await
    }

    async fn swap_up(&mut self) -> Result<()> {
        match self.state.cursor.checked_sub(1) {
            Some(to) => self.move_active(to).await,
            None => Ok(()),
        }
    }

    async fn swap_down(&mut self) -> Result<()> {
        self.move_active(self.state.cursor + 1).await
    }

    async fn edit(&mut self) -> Result<()> {
        let list = self.state.selected;
        let Some(item) = self.state.current_item() else {
            return Ok(());
        };
        let (todo_id, task) = (item.id, item.task.clone());

        let edited = self.editor.edit_text(&task).await;
        // the editor had the terminal, so the screen is rebuilt either way
        if let Some(control) = self.control.as_mut() {
            control.request_restart();
        }

        let edited = edited?;
        let text = edited.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.store.update_task(todo_id, text).await?;
        let cursor = self.state.cursor;
        self.state.list_mut(list)[cursor].task = text.to_string();
        Ok(())
    }

    async fn move_between_lists(&mut self) -> Result<()> {
        let source = self.state.selected;
        let Some(item) = self.state.current_item() else {
            return Ok(());
        };
        let todo_id = item.id;
        let destination = source.other();
        let project_id = match destination {
            ListKind::Active => self.project_id,
            ListKind::Queue => self.queue_project_id,
        };

        self.store.move_to_project(todo_id, project_id).await?;

        let cursor = self.state.cursor;
        let item = self.state.list_mut(source).remove(cursor);
        self.state.list_mut(destination).push(item);
        self.state.cursor = cursor.saturating_sub(1);
        if self.state.list(source).is_empty() {
            self.state.select(destination);
        }
        Ok(())
    }

    fn request_delete(&mut self) -> Action {
        let Some(item) = self.state.current_item() else {
            return Action::None;
        };

        let op = match self.state.selected {
            ListKind::Active if item.done => return Action::Bell,
            ListKind::Active => PendingOp::DeleteActiveItem(self.state.cursor),
            ListKind::Queue => PendingOp::DeleteQueueItem(self.state.cursor),
        };
        self.state.request_confirmation(op);
        Action::None
    }

    fn request_push_stash(&mut self) -> Action {
        let Some(item) = self.current_active() else {
            return Action::None;
        };
        if item.stash.is_some() {
            return Action::Bell;
        }
        self.state.request_confirmation(PendingOp::PushStash(self.state.cursor));
        Action::None
    }

    fn request_pop_stash(&mut self) {
        if self.current_active().is_some_and(|item| item.stash.is_some()) {
            self.state.request_confirmation(PendingOp::PopStash(self.state.cursor));
        }
    }

    async fn confirm(&mut self) -> Result<()> {
        let Some(pending) = self.state.pending.take() else {
            return Ok(());
        };
        self.state.select(pending.op.origin());

        match pending.op {
            PendingOp::DeleteActiveItem(index) => self.delete_item(ListKind::Active, index).await,
            PendingOp::DeleteQueueItem(index) => self.delete_item(ListKind::Queue, index).await,
            PendingOp::PushStash(index) => self.push_stash(index).await,
            PendingOp::PopStash(index) => self.pop_stash(index).await,
        }
    }

    async fn delete_item(&mut self, list: ListKind, index: usize) -> Result<()> {
        let Some(item) = self.state.list(list).get(index) else {
            return Ok(());
        };

        self.store.delete_item(item.id).await?;
        self.state.list_mut(list).remove(index);

        if self.state.list(list).is_empty() {
            self.state.cursor = 0;
            if !self.state.list(list.other()).is_empty() {
                self.state.select(list.other());
            }
        } else {
            self.state.clamp_cursor();
        }
        Ok(())
    }

    async fn push_stash(&mut self, index: usize) -> Result<()> {
        let Some(item) = self.state.active.get(index) else {
            return Ok(());
        };
        let todo_id = item.id;

        self.stash.push_stash(todo_id).await?;
        let mut stashes = self.stash.list_stash_references().await?;
        self.state.active[index].stash = stashes.remove(&todo_id);
        Ok(())
    }

    async fn pop_stash(&mut self, index: usize) -> Result<()> {
        let Some(reference) = self
            .state
            .active
            .get(index)
            .and_then(|item| item.stash.as_ref())
            .map(|stash| stash.reference.clone())
        else {
            return Ok(());
        };

        self.stash.pop_stash(&reference).await?;
        self.state.active[index].stash = None;
        Ok(())
    }
}

impl Component for ListSession {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.handle_global_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        render_ui(f, rect, &mut self.state);
    }
}

/// Stored 1-based position of a list index.
fn position(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}
