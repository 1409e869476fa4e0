use branchdo::shell::StashRef;
use branchdo::ui::renderer::render_ui;
use branchdo::ui::state::{ListKind, PendingOp, SessionState, Timer, TodoItem};
use ratatui::{backend::TestBackend, Terminal};

fn item(id: i32, task: &str, done: bool) -> TodoItem {
    TodoItem {
        id,
        task: task.to_string(),
        done,
        committed: false,
        stash: None,
    }
}

fn screen(active: Vec<TodoItem>, queue: Vec<TodoItem>, width: u16, height: u16) -> SessionState {
    let mut state = SessionState::new("main", "main", active, queue, Timer::default());
    state.resize(width, height);
    state
}

/// Draw the state and return each screen row without trailing blanks.
fn draw(state: &mut SessionState) -> Vec<String> {
    let (width, height) = (state.viewport.width, state.viewport.height);
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            render_ui(f, area, state);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            let row: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
            row.trim_end().to_string()
        })
        .collect()
}

#[test]
fn test_renders_both_lists() {
    let mut state = screen(
        vec![item(1, "A", false), item(2, "B", true)],
        vec![item(3, "X", false)],
        50,
        12,
    );

    let rows = draw(&mut state);

    let rule = "─".repeat(22);
    assert_eq!(rows[0], format!("{rule} main {rule}"));
    assert_eq!(
        rows[1..10],
        [
            "  TO-DO LIST:",
            "",
            "> [ ] A",
            "  [X] B",
            "",
            "  QUEUE:",
            "",
            "  X",
            "",
        ]
    );
    assert_eq!(rows[10], "─".repeat(50));
    assert_eq!(rows[11], "  to-do items: toggle help with 'h' or '?'");
}

#[test]
fn test_cursor_in_queue() {
    let mut state = screen(vec![item(1, "A", false)], vec![item(3, "X", false)], 50, 12);
    state.select(ListKind::Queue);
    state.cursor = 0;

    let rows = draw(&mut state);

    assert_eq!(rows[3], "  [ ] A");
    assert_eq!(rows[7], "> X");
    assert_eq!(rows[11], "  queue items: toggle help with 'h' or '?'");
}

#[test]
fn test_custom_name_and_timer_badge() {
    let timer = Timer {
        running: true,
        elapsed_seconds: 59,
    };
    let mut state = SessionState::new("Faster startup", "perf", vec![item(1, "A", false)], vec![], timer);
    state.resize(40, 10);
    state.timer.tick();

    let rows = draw(&mut state);

    assert_eq!(rows[0].trim(), "Faster startup");
    assert!(rows[1].contains(" perf "));
    assert_eq!(rows[2].trim(), "00:01:00");
    assert_eq!(rows[3], "  TO-DO LIST:");
}

#[test]
fn test_stopped_timer_with_recorded_time_is_shown() {
    let timer = Timer {
        running: false,
        elapsed_seconds: 3661,
    };
    let mut state = SessionState::new("main", "main", vec![item(1, "A", false)], vec![], timer);
    state.resize(40, 10);

    let rows = draw(&mut state);

    assert_eq!(rows[1].trim(), "01:01:01");
}

#[test]
fn test_item_markers_and_ids() {
    let mut committed = item(7, "A", true);
    committed.committed = true;
    committed.stash = Some(StashRef::from_reference("stash@{Tue Jan 14 19:13:06 2025}"));
    let mut state = screen(vec![committed], vec![item(8, "X", false)], 60, 14);
    state.show_item_ids = true;

    let rows = draw(&mut state);

    assert_eq!(rows[3], "> [X] [#7] A");
    assert_eq!(rows[4], "      • committed");
    assert_eq!(rows[5], "      • stashed: Tue Jan 14 19:13:06 2025");
    assert_eq!(rows[9], "  [#8] X");
}

#[test]
fn test_long_items_wrap_under_text() {
    let mut state = screen(vec![item(1, "alpha beta gamma", false)], vec![], 14, 10);

    let rows = draw(&mut state);

    assert_eq!(rows[0], "──── main ────");
    assert_eq!(rows[3..6], ["> [ ] alpha", "      beta", "      gamma"]);
}

#[test]
fn test_body_scrolls_to_selection() {
    let items = (0..10).map(|i| item(i, &format!("item {i}"), false)).collect();
    let mut state = screen(items, vec![], 50, 8);
    state.cursor = 9;

    let rows = draw(&mut state);

    assert_eq!(state.scroll, 7);
    assert_eq!(rows[1], "  [ ] item 5");
    assert_eq!(rows[5], "> [ ] item 9");

    state.cursor = 0;
    let rows = draw(&mut state);

    assert_eq!(state.scroll, 0);
    assert_eq!(rows[1], "  TO-DO LIST:");
}

#[test]
fn test_prompt_and_error_messages() {
    let mut state = screen(vec![item(1, "A", false)], vec![], 50, 10);

    state.request_confirmation(PendingOp::DeleteActiveItem(0));
    let rows = draw(&mut state);
    assert_eq!(rows[9], "  delete todo item: are you sure? (y/n)");
    assert_eq!(rows[3], "> [ ] A", "the cursor stays visible while confirming");

    state.set_error("database is locked");
    let rows = draw(&mut state);
    assert_eq!(rows[9], "  database is locked");
}

#[test]
fn test_help_table() {
    let mut state = screen(vec![item(1, "A", false)], vec![item(2, "X", false)], 80, 14);
    state.toggle_help();

    let rows = draw(&mut state);

    // rule, three rows of keys, rule, hint
    assert_eq!(rows[8], "─".repeat(80));
    assert!(rows[9].starts_with(" Q Quit"));
    assert!(rows[9].contains("Toggle done"));
    assert!(rows[11].contains("Pop stash"));
    assert_eq!(rows[12], "─".repeat(80));
    assert_eq!(rows[13], "  to-do items: toggle help with 'h' or '?'");

    state.select(ListKind::Queue);
    let rows = draw(&mut state);

    assert!(rows[10].contains("Make todo"));
    assert!(rows[11].contains("Delete"));
    assert_eq!(rows[12], "─".repeat(80));
    assert_eq!(rows[13], "  queue items: toggle help with 'h' or '?'");
}

#[test]
fn test_help_hidden_while_confirming() {
    let mut state = screen(vec![item(1, "A", false)], vec![], 50, 10);
    state.toggle_help();
    state.request_confirmation(PendingOp::PushStash(0));

    let rows = draw(&mut state);

    assert_eq!(rows[8], "─".repeat(50));
    assert_eq!(rows[9], "  push changes to stash? (y/n)");
}

#[test]
fn test_wide_characters_wrap_by_cell_width() {
    let task = "日本語日本語日本語日";
    let mut state = screen(vec![item(1, task, false)], vec![], 20, 12);

    let rows = draw(&mut state);

    let shown: String = rows
        .iter()
        .flat_map(|row| row.chars())
        .filter(|c| !c.is_ascii())
        .filter(|c| *c != '─')
        .collect();
    assert_eq!(shown, task, "every glyph of the task is drawn");
    assert!(rows[3].starts_with("> [ ] 日"));
    assert!(rows[4].starts_with("      本"));
}

#[test]
fn test_branch_rule_fits_wide_branch_name() {
    let mut state = SessionState::new("機能", "機能", vec![item(1, "A", false)], vec![], Timer::default());
    state.resize(20, 12);

    let rows = draw(&mut state);

    assert_eq!(rows[0].chars().filter(|c| *c == '─').count(), 14);
    assert!(rows[0].starts_with(&"─".repeat(7)));
    assert!(rows[0].ends_with('─'));
}
