//! Header: project name, branch rule and timer badge

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::ui::layout::LayoutManager;
use crate::ui::state::{SessionState, Timer};
use crate::utils::datetime::format_seconds;
use crate::utils::wordwrap::display_width;

pub struct Header;

impl Header {
    /// Header lines, as many as [`LayoutManager::header_height`].
    pub fn lines(state: &SessionState) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = LayoutManager::name_lines(state)
            .into_iter()
            .map(|line| {
                Line::from(Span::styled(line, Style::default().add_modifier(Modifier::BOLD))).centered()
            })
            .collect();

        lines.push(Self::branch_line(&state.branch, usize::from(state.viewport.width)));

        if state.timer.is_visible() {
            lines.push(Self::timer_badge(&state.timer));
        }

        lines
    }

    /// `──── branch ────` spanning the full width.
    pub fn branch_line(branch: &str, width: usize) -> Line<'static> {
        let label = format!(" {branch} ");
        let fill = width.saturating_sub(display_width(&label));
        let left = fill / 2;
        let rule = Style::default().fg(Color::DarkGray);

        Line::from(vec![
            Span::styled("─".repeat(left), rule),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("─".repeat(fill - left), rule),
        ])
    }

    pub fn timer_badge(timer: &Timer) -> Line<'static> {
        let style = if timer.running {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Line::from(Span::styled(format!(" {} ", format_seconds(timer.elapsed_seconds)), style)).centered()
    }
}
