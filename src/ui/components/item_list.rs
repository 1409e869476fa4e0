//! Body: the to-do list followed by the queue

use std::ops::Range;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::constants::{MARKER_COMMITTED, MARKER_STASHED, TITLE_ACTIVE, TITLE_QUEUE};
use crate::ui::state::{ListKind, SessionState, TodoItem};
use crate::utils::wordwrap::{display_width, wrap_lines};

/// Continuation indent of active items, the width of `> [X] `.
const ACTIVE_GLUE: &str = "      ";
/// Continuation indent of queue items, the width of `> `.
const QUEUE_GLUE: &str = "  ";

pub const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Rendered body lines and where the selected item sits in them.
#[derive(Debug, Clone)]
pub struct BodyView {
    pub lines: Vec<Line<'static>>,
    /// Lines of the selected item. The first item of a list also covers
    /// the list title, so scrolling to it reveals the title.
    pub selected: Option<Range<usize>>,
}

pub struct ItemList;

impl ItemList {
    pub fn view(state: &SessionState) -> BodyView {
        let width = usize::from(state.viewport.width);
        let mut lines = Vec::new();
        let mut selected = None;

        let title = Style::default().add_modifier(Modifier::BOLD);

        lines.push(Line::from(Span::styled(TITLE_ACTIVE, title)));
        lines.push(Line::default());
        for (index, item) in state.active.iter().enumerate() {
            let start = if index == 0 { 0 } else { lines.len() };
            let is_cursor = state.selected == ListKind::Active && state.cursor == index;
            lines.extend(Self::item_lines(item, ListKind::Active, is_cursor, state.show_item_ids, width));
            if is_cursor {
                selected = Some(start..lines.len());
            }
        }

        if !state.queue.is_empty() {
            let queue_start = lines.len();
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(TITLE_QUEUE, title)));
            lines.push(Line::default());
            for (index, item) in state.queue.iter().enumerate() {
                let start = if index == 0 { queue_start } else { lines.len() };
                let is_cursor = state.selected == ListKind::Queue && state.cursor == index;
                lines.extend(Self::item_lines(item, ListKind::Queue, is_cursor, state.show_item_ids, width));
                if is_cursor {
                    selected = Some(start..lines.len());
                }
            }
        }

        BodyView { lines, selected }
    }

    /// `[>| ] [X| ] task` on the to-do list, `[>| ] task` on the queue.
    pub fn item_lines(
        item: &TodoItem,
        list: ListKind,
        is_cursor: bool,
        show_ids: bool,
        width: usize,
    ) -> Vec<Line<'static>> {
        let glue = match list {
            ListKind::Active => ACTIVE_GLUE,
            ListKind::Queue => QUEUE_GLUE,
        };
        let text = if show_ids {
            format!("[#{}] {}", item.id, item.task)
        } else {
            item.task.clone()
        };

        let base = if is_cursor {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let text_style = if item.done && list == ListKind::Active && !is_cursor {
            base.fg(Color::DarkGray)
        } else {
            base
        };

        let mut prefix = vec![Span::styled(if is_cursor { "> " } else { "  " }, base)];
        if list == ListKind::Active {
            let checkbox = if item.done {
                Span::styled("[X]", base.fg(Color::Green))
            } else {
                Span::styled("[ ]", base)
            };
            prefix.push(checkbox);
            prefix.push(Span::raw(" "));
        }

        let mut lines = Vec::new();
        for (i, wrapped) in wrap_lines(&text, width.saturating_sub(display_width(glue)))
            .into_iter()
            .enumerate()
        {
            let mut spans = if i == 0 {
                prefix.clone()
            } else {
                vec![Span::raw(glue)]
            };
            spans.push(Span::styled(wrapped, text_style));
            lines.push(Line::from(spans));
        }

        if list == ListKind::Active {
            if item.committed {
                lines.push(Self::marker_line(glue, MARKER_COMMITTED.to_string(), Color::Green));
            }
            if let Some(stash) = &item.stash {
                lines.push(Self::marker_line(glue, format!("{MARKER_STASHED}{}", stash.date), ORANGE));
            }
        }

        lines
    }

    fn marker_line(glue: &'static str, text: String, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::raw(glue),
            Span::styled("• ", Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(color)),
        ])
    }
}
