//! Draws the list screen from session state

use std::ops::Range;

use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use super::components::{Footer, Header, ItemList};
use super::layout::LayoutManager;
use super::state::SessionState;

/// Render header, body and footer into `area`.
///
/// Only the body scroll offset is written back, so the selected item
/// stays on screen.
pub fn render_ui(f: &mut Frame, area: Rect, state: &mut SessionState) {
    let chunks = LayoutManager::main_layout(area, state);

    f.render_widget(Paragraph::new(Header::lines(state)), chunks[0]);

    let body = ItemList::view(state);
    state.scroll = follow_selection(state.scroll, body.selected, usize::from(chunks[1].height));
    let scroll = u16::try_from(state.scroll).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(body.lines).scroll((scroll, 0)), chunks[1]);

    f.render_widget(Paragraph::new(Footer::lines(state)), chunks[2]);
}

/// Smallest change to `scroll` that brings the selected lines into view.
/// An item taller than the view is aligned on its first line.
pub fn follow_selection(scroll: usize, selected: Option<Range<usize>>, height: usize) -> usize {
    let Some(selected) = selected else {
        return scroll;
    };
    if height == 0 {
        return scroll;
    }

    if selected.start < scroll {
        selected.start
    } else if selected.end > scroll + height {
        selected.end.saturating_sub(height).min(selected.start)
    } else {
        scroll
    }
}
