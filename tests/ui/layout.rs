use branchdo::ui::components::{Footer, Header};
use branchdo::ui::layout::{body_height, LayoutManager};
use branchdo::ui::state::{ListKind, PendingOp, SessionState, Timer, TodoItem};
use ratatui::layout::Rect;

fn state(name: &str, timer: Timer) -> SessionState {
    let items = vec![TodoItem {
        id: 1,
        task: "A".to_string(),
        done: false,
        committed: false,
        stash: None,
    }];
    let mut state = SessionState::new(name, "main", items.clone(), items, timer);
    state.resize(14, 30);
    state
}

fn variants() -> Vec<SessionState> {
    let running = Timer {
        running: true,
        elapsed_seconds: 0,
    };
    let mut variants = Vec::new();
    for name in ["main", "Faster startup for everyone"] {
        for timer in [Timer::default(), running] {
            for help in [false, true] {
                for list in [ListKind::Active, ListKind::Queue] {
                    let mut s = state(name, timer);
                    s.show_help = help;
                    s.select(list);
                    variants.push(s.clone());

                    s.request_confirmation(PendingOp::DeleteQueueItem(0));
                    variants.push(s);
                }
            }
        }
    }
    variants
}

#[test]
fn test_heights_match_rendered_lines() {
    for s in variants() {
        assert_eq!(usize::from(LayoutManager::header_height(&s)), Header::lines(&s).len());
        assert_eq!(usize::from(LayoutManager::footer_height(&s)), Footer::lines(&s).len());
        assert_eq!(
            LayoutManager::header_height(&s) + body_height(&s) + LayoutManager::footer_height(&s),
            s.viewport.height
        );
        assert_eq!(s.viewport.body_height, body_height(&s));
    }
}

#[test]
fn test_main_layout_splits_screen() {
    let s = state("Faster startup for everyone", Timer::default());
    let chunks = LayoutManager::main_layout(Rect::new(0, 0, 14, 30), &s);

    assert_eq!(chunks.len(), 3);
    // four name lines and the branch line
    assert_eq!(chunks[0].height, 5);
    assert_eq!(chunks[1].height, 23);
    assert_eq!(chunks[2].height, 2);
}

#[test]
fn test_name_wraps_to_header_width() {
    let s = state("Faster startup for everyone", Timer::default());
    assert_eq!(LayoutManager::name_width(14), 10);
    assert_eq!(
        LayoutManager::name_lines(&s),
        vec!["Faster", "startup", "for", "everyone"]
    );

    let plain = state("main", Timer::default());
    assert!(LayoutManager::name_lines(&plain).is_empty());
}

#[test]
fn test_help_rows() {
    assert_eq!(LayoutManager::help_rows(ListKind::Active), 3);
    assert_eq!(LayoutManager::help_rows(ListKind::Queue), 2);
    assert_eq!(LayoutManager::name_width(2), 1);
}

#[test]
fn test_small_terminal_leaves_no_body() {
    let mut s = state("main", Timer::default());
    s.show_help = true;
    s.resize(14, 3);
    assert_eq!(body_height(&s), 0);
}
