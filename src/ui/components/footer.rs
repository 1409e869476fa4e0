//! Footer: optional key table and the message line

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::item_list::ORANGE;
use crate::constants::{HINT_ACTIVE, HINT_QUEUE};
use crate::ui::layout::{LayoutManager, HELP_COLUMNS};
use crate::ui::state::{ListKind, SessionState};
use crate::utils::wordwrap::display_width;

pub struct Footer;

impl Footer {
    /// Footer lines, as many as [`LayoutManager::footer_height`].
    pub fn lines(state: &SessionState) -> Vec<Line<'static>> {
        let width = usize::from(state.viewport.width);
        let mut lines = Vec::new();

        if state.help_visible() {
            lines.push(Self::rule(width));
            lines.extend(Self::help_table(state.selected, width));
        }

        lines.push(Self::rule(width));
        lines.push(Self::message_line(state));
        lines
    }

    fn rule(width: usize) -> Line<'static> {
        Line::from(Span::styled("─".repeat(width), Style::default().fg(Color::DarkGray)))
    }

    /// Error first, then the pending prompt, then the hint for the list.
    pub fn message_line(state: &SessionState) -> Line<'static> {
        let (text, style) = if let Some(error) = &state.error_message {
            (error.clone(), Style::default().fg(Color::Red))
        } else if let Some(pending) = &state.pending {
            (pending.prompt.clone(), Style::default().fg(ORANGE))
        } else {
            let hint = match state.selected {
                ListKind::Active => HINT_ACTIVE,
                ListKind::Queue => HINT_QUEUE,
            };
            (hint.to_string(), Style::default().fg(Color::DarkGray))
        };

        Line::from(vec![Span::raw("  "), Span::styled(text, style)])
    }

    /// Key table, [`HELP_COLUMNS`] cells per row.
    pub fn help_table(list: ListKind, width: usize) -> Vec<Line<'static>> {
        let cell_width = width / HELP_COLUMNS;

        LayoutManager::help_keys(list)
            .chunks(HELP_COLUMNS)
            .map(|row| {
                let mut spans = Vec::new();
                for (key, label) in row {
                    let key = if display_width(key) == 1 {
                        format!(" {key}")
                    } else {
                        (*key).to_string()
                    };
                    let used = display_width(&key) + 1 + display_width(label);
                    spans.push(Span::styled(key, Style::default().add_modifier(Modifier::BOLD)));
                    spans.push(Span::styled(format!(" {label}"), Style::default().fg(Color::Gray)));
                    spans.push(Span::raw(" ".repeat(cell_width.saturating_sub(used))));
                }
                Line::from(spans)
            })
            .collect()
    }
}
