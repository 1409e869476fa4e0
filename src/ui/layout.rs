//! Layout management and calculations
//!
//! Header and footer heights are pure functions of the session state and
//! always equal the number of lines the renderer produces for them.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::state::{ListKind, SessionState};
use crate::utils::wordwrap::wrap_lines;

/// Key table cells per footer row.
pub const HELP_COLUMNS: usize = 4;

/// Help keys on the to-do list, as (key, label).
pub const ACTIVE_KEYS: &[(&str, &str)] = &[
    ("Q", "Quit"),
    ("K", "Up"),
    ("J", "Down"),
    ("⎵", "Toggle done"),
    ("^K", "Push up"),
    ("^J", "Push down"),
    ("T", "Push to top"),
    ("E", "Edit"),
    ("D", "Delete"),
    ("M", "Move to queue"),
    ("S", "Stash"),
    ("P", "Pop stash"),
];

/// Help keys on the queue.
pub const QUEUE_KEYS: &[(&str, &str)] = &[
    ("Q", "Quit"),
    ("K", "Up"),
    ("J", "Down"),
    ("M", "Make todo"),
    ("E", "Edit"),
    ("D", "Delete"),
];

/// Manages layout calculations for the list screen
pub struct LayoutManager;

impl LayoutManager {
    /// Split the screen into header, body and footer.
    #[must_use]
    pub fn main_layout(area: Rect, state: &SessionState) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::header_height(state)),
                Constraint::Min(0),
                Constraint::Length(Self::footer_height(state)),
            ])
            .split(area)
            .to_vec()
    }

    #[must_use]
    pub fn help_keys(list: ListKind) -> &'static [(&'static str, &'static str)] {
        match list {
            ListKind::Active => ACTIVE_KEYS,
            ListKind::Queue => QUEUE_KEYS,
        }
    }

    #[must_use]
    pub fn help_rows(list: ListKind) -> usize {
        Self::help_keys(list).len().div_ceil(HELP_COLUMNS)
    }

    /// Width available to the wrapped project name.
    #[must_use]
    pub fn name_width(width: u16) -> usize {
        usize::from(width.saturating_sub(4)).max(1)
    }

    /// Lines of the wrapped project name, if the header shows one.
    #[must_use]
    pub fn name_lines(state: &SessionState) -> Vec<String> {
        if !state.has_custom_name() {
            return Vec::new();
        }
        wrap_lines(&state.project_name, Self::name_width(state.viewport.width))
    }

    /// name lines + branch line + timer badge
    #[must_use]
    pub fn header_height(state: &SessionState) -> u16 {
        let name = Self::name_lines(state).len();
        let timer = usize::from(state.timer.is_visible());
        to_height(name + 1 + timer)
    }

    /// rule + message, plus rule + key table while help is visible
    #[must_use]
    pub fn footer_height(state: &SessionState) -> u16 {
        let help = if state.help_visible() {
            1 + Self::help_rows(state.selected)
        } else {
            0
        };
        to_height(2 + help)
    }
}

/// Lines left for the body.
#[must_use]
pub fn body_height(state: &SessionState) -> u16 {
    state
        .viewport
        .height
        .saturating_sub(LayoutManager::header_height(state))
        .saturating_sub(LayoutManager::footer_height(state))
}

fn to_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}
