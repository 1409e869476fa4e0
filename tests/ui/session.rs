use std::sync::atomic::Ordering;

use branchdo::constants::{PROMPT_DELETE_QUEUE, PROMPT_POP_STASH, PROMPT_PUSH_STASH};
use branchdo::shell::StashRef;
use branchdo::storage::TodoStore;
use branchdo::ui::core::{screen_channel, Action, EventType, ScreenExit};
use branchdo::ui::state::{ListKind, Mode};
use crossterm::event::KeyCode;

use crate::support::{code, ctrl, key, press, tasks, Fixture};

#[tokio::test]
async fn test_load_starts_on_first_open_item() {
    let fixture = Fixture::new(&["A", "B", "C"], &["X"]).await;
    let first = fixture.storage().list_items(fixture.project_id).await.unwrap()[0].todo_id;
    fixture.storage().set_done(first, true).await.unwrap();

    let session = fixture.session().await;
    let state = session.state();

    assert_eq!(state.mode(), Mode::Active);
    assert_eq!(state.cursor, 1);
    assert_eq!(tasks(&state.active), vec!["A", "B", "C"]);
    assert_eq!(tasks(&state.queue), vec!["X"]);
    assert!(state.active[0].done);
    assert!(!state.timer.is_visible());
}

#[tokio::test]
async fn test_load_with_empty_active_list_selects_queue() {
    let fixture = Fixture::new(&[], &["X"]).await;
    let session = fixture.session().await;

    assert_eq!(session.state().mode(), Mode::Queue);
    assert_eq!(session.state().cursor, 0);
}

#[tokio::test]
async fn test_load_picks_up_running_timer_and_stashes() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let items = fixture.storage().list_items(fixture.project_id).await.unwrap();
    fixture.stash.stashes.lock().unwrap().insert(
        items[1].todo_id,
        StashRef::from_reference("stash@{Tue Jan 14 19:13:06 2025}"),
    );
    fixture.storage().start_timer(fixture.project_id).await.unwrap();

    let session = fixture.session().await;
    let state = session.state();

    assert!(state.timer.running);
    assert!(state.timer.is_visible());
    assert!(state.active[0].stash.is_none());
    assert_eq!(
        state.active[1].stash.as_ref().map(|s| s.reference.as_str()),
        Some("stash@{Tue Jan 14 19:13:06 2025}")
    );
}

#[tokio::test]
async fn test_cursor_moves_down_into_queue() {
    let fixture = Fixture::new(&["A", "B"], &["X", "Y"]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('j')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Active, 1));

    press(&mut session, key('j')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Queue, 0));

    press(&mut session, code(KeyCode::Down)).await;
    press(&mut session, key('j')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Active, 0));

    press(&mut session, key('k')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Queue, 1));
}

#[tokio::test]
async fn test_cursor_stays_when_other_list_is_empty() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('j')).await;
    press(&mut session, key('j')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Active, 1));

    press(&mut session, key('k')).await;
    press(&mut session, key('k')).await;
    assert_eq!((session.state().selected, session.state().cursor), (ListKind::Active, 0));
}

#[tokio::test]
async fn test_toggle_done_twice_restores_item() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key(' ')).await;
    assert!(session.state().active[0].done);
    assert!(fixture.storage().list_items(fixture.project_id).await.unwrap()[0].is_done());

    press(&mut session, code(KeyCode::Enter)).await;
    assert!(!session.state().active[0].done);
    assert!(!fixture.storage().list_items(fixture.project_id).await.unwrap()[0].is_done());
}

#[tokio::test]
async fn test_toggle_done_is_ignored_in_queue() {
    let fixture = Fixture::new(&[], &["X"]).await;
    let mut session = fixture.session().await;

    press(&mut session, key(' ')).await;

    assert!(!session.state().queue[0].done);
    assert!(!fixture.storage().list_items(fixture.queue_id).await.unwrap()[0].is_done());
}

#[tokio::test]
async fn test_promote_to_top() {
    let fixture = Fixture::new(&["A", "B", "C"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('j')).await;
    press(&mut session, key('j')).await;
    press(&mut session, key('t')).await;

    assert_eq!(tasks(&session.state().active), vec!["C", "A", "B"]);
    assert_eq!(session.state().cursor, 0);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_swap_up_then_down_restores_order() {
    let fixture = Fixture::new(&["A", "B", "C"], &[]).await;
    let mut session = fixture.session().await;
    press(&mut session, key('j')).await;

    press(&mut session, ctrl('k')).await;
    assert_eq!(tasks(&session.state().active), vec!["B", "A", "C"]);
    assert_eq!(session.state().cursor, 0);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["B", "A", "C"]);

    press(&mut session, ctrl('j')).await;
    assert_eq!(tasks(&session.state().active), vec!["A", "B", "C"]);
    assert_eq!(session.state().cursor, 1);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_swap_at_list_edges_is_a_no_op() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, ctrl('k')).await;
    press(&mut session, key('j')).await;
    press(&mut session, ctrl('j')).await;

    assert_eq!(tasks(&session.state().active), vec!["A", "B"]);
    assert_eq!(session.state().cursor, 1);
}

#[tokio::test]
async fn test_delete_done_item_rings_bell() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key(' ')).await;
    let action = press(&mut session, key('d')).await;

    assert_eq!(action, Action::Bell);
    assert!(session.state().pending.is_none());
    assert_eq!(session.state().active.len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_clamps_cursor() {
    let fixture = Fixture::new(&["A", "B", "C"], &[]).await;
    let mut session = fixture.session().await;
    press(&mut session, key('j')).await;
    press(&mut session, key('j')).await;

    press(&mut session, key('d')).await;
    assert_eq!(session.state().mode(), Mode::Confirming);

    press(&mut session, key('y')).await;
    assert_eq!(session.state().mode(), Mode::Active);
    assert_eq!(tasks(&session.state().active), vec!["A", "B"]);
    assert_eq!(session.state().cursor, 1);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_deleting_last_active_item_switches_to_queue() {
    let fixture = Fixture::new(&["A"], &["X"]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('d')).await;
    press(&mut session, key('Y')).await;

    assert!(session.state().active.is_empty());
    assert_eq!(session.state().mode(), Mode::Queue);
    assert_eq!(session.state().cursor, 0);
}

#[tokio::test]
async fn test_cancelled_queue_delete_returns_to_queue() {
    let fixture = Fixture::new(&["A"], &["X"]).await;
    let mut session = fixture.session().await;
    press(&mut session, key('j')).await;

    press(&mut session, key('d')).await;
    let pending = session.state().pending.clone().unwrap();
    assert_eq!(pending.prompt, PROMPT_DELETE_QUEUE);

    press(&mut session, key('n')).await;

    assert_eq!(session.state().mode(), Mode::Queue);
    assert_eq!(tasks(&session.state().queue), vec!["X"]);
    assert_eq!(fixture.stored(fixture.queue_id).await, vec!["X"]);
}

#[tokio::test]
async fn test_confirmed_queue_delete_removes_item() {
    let fixture = Fixture::new(&["A"], &["X", "Y"]).await;
    let mut session = fixture.session().await;
    press(&mut session, key('j')).await;

    press(&mut session, key('d')).await;
    press(&mut session, key('y')).await;

    assert_eq!(session.state().mode(), Mode::Queue);
    assert_eq!(tasks(&session.state().queue), vec!["Y"]);
    assert_eq!(fixture.stored(fixture.queue_id).await, vec!["Y"]);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["A"]);

    press(&mut session, key('d')).await;
    press(&mut session, key('Y')).await;

    let state = session.state();
    assert!(state.queue.is_empty());
    assert_eq!(state.mode(), Mode::Active, "an empty queue hands over to the to-do list");
    assert_eq!(state.cursor, 0);
    assert!(fixture.stored(fixture.queue_id).await.is_empty());
}

#[tokio::test]
async fn test_confirmation_ignores_other_keys() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('d')).await;
    press(&mut session, key('j')).await;
    press(&mut session, key(' ')).await;
    press(&mut session, key('q')).await;

    assert_eq!(session.state().mode(), Mode::Confirming);
    assert_eq!(session.state().cursor, 0);
    assert!(!session.state().active[0].done);

    press(&mut session, code(KeyCode::Esc)).await;
    assert_eq!(session.state().mode(), Mode::Active);
    assert_eq!(session.state().active.len(), 2);
}

#[tokio::test]
async fn test_move_to_queue_and_back() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let mut session = fixture.session().await;
    press(&mut session, key(' ')).await;
    let original = session.state().active[0].clone();

    press(&mut session, key('m')).await;
    assert_eq!(tasks(&session.state().active), vec!["B"]);
    assert_eq!(tasks(&session.state().queue), vec!["A"]);

    press(&mut session, key('j')).await;
    assert_eq!(session.state().mode(), Mode::Queue);
    press(&mut session, key('m')).await;

    let state = session.state();
    assert!(state.queue.is_empty());
    assert_eq!(state.mode(), Mode::Active);
    assert_eq!(tasks(&state.active), vec!["B", "A"]);
    assert_eq!(state.active[1], original);

    assert_eq!(fixture.stored(fixture.project_id).await, vec!["B", "A"]);
    let stored = &fixture.storage().list_items(fixture.project_id).await.unwrap()[1];
    assert_eq!(stored.todo_id, original.id);
    assert!(stored.is_done());
}

#[tokio::test]
async fn test_move_last_item_to_queue() {
    let fixture = Fixture::new(&["A", "B", "C"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('j')).await;
    press(&mut session, key('j')).await;
    press(&mut session, key('m')).await;

    let state = session.state();
    assert_eq!(tasks(&state.active), vec!["A", "B"]);
    assert_eq!(tasks(&state.queue), vec!["C"]);
    assert_eq!(state.mode(), Mode::Active);
    assert_eq!(state.cursor, 1);
    assert_eq!(fixture.stored(fixture.queue_id).await, vec!["C"]);
}

#[tokio::test]
async fn test_storage_failure_sets_error_and_keeps_state() {
    let fixture = Fixture::new(&["A", "B"], &[]).await;
    let mut session = fixture.session().await;
    fixture.store.fail_writes.store(true, Ordering::SeqCst);

    let action = press(&mut session, key(' ')).await;
    assert_eq!(action, Action::None);
    assert!(!session.state().active[0].done);
    assert_eq!(session.state().error_message.as_deref(), Some("database is locked"));

    press(&mut session, ctrl('j')).await;
    assert_eq!(tasks(&session.state().active), vec!["A", "B"]);

    fixture.store.fail_writes.store(false, Ordering::SeqCst);
    press(&mut session, key('d')).await;
    assert!(session.state().error_message.is_none(), "a mode change clears the error");
}

#[tokio::test]
async fn test_edit_updates_item_and_restarts_screen() {
    let fixture = Fixture::new(&["A"], &[]).await;
    *fixture.editor.reply.lock().unwrap() = Some("  Renamed\n".to_string());
    let mut session = fixture.session().await;
    let (control, mut signals) = screen_channel();
    session.attach_screen(control);

    press(&mut session, key('e')).await;

    assert_eq!(fixture.editor.calls.lock().unwrap().as_slice(), ["A".to_string()]);
    assert_eq!(tasks(&session.state().active), vec!["Renamed"]);
    assert_eq!(fixture.stored(fixture.project_id).await, vec!["Renamed"]);
    assert_eq!(signals.poll(), Some(ScreenExit::Restart));
}

#[tokio::test]
async fn test_edit_to_empty_text_keeps_item() {
    let fixture = Fixture::new(&[], &["X"]).await;
    *fixture.editor.reply.lock().unwrap() = Some("   \n".to_string());
    let mut session = fixture.session().await;
    let (control, mut signals) = screen_channel();
    session.attach_screen(control);

    press(&mut session, key('E')).await;

    assert_eq!(tasks(&session.state().queue), vec!["X"]);
    assert_eq!(signals.poll(), Some(ScreenExit::Restart));
}

#[tokio::test]
async fn test_failed_editor_still_restarts_screen() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    let (control, mut signals) = screen_channel();
    session.attach_screen(control);

    press(&mut session, key('e')).await;

    assert_eq!(tasks(&session.state().active), vec!["A"]);
    assert!(session.state().error_message.is_some());
    assert_eq!(signals.poll(), Some(ScreenExit::Restart));
}

#[tokio::test]
async fn test_quit_fires_exit_signal() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    let (control, mut signals) = screen_channel();
    session.attach_screen(control);

    assert_eq!(signals.poll(), None);
    assert_eq!(press(&mut session, key('q')).await, Action::Quit);
    assert_eq!(signals.poll(), Some(ScreenExit::Quit));
}

#[tokio::test]
async fn test_ctrl_c_quits_while_confirming() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('d')).await;
    assert_eq!(press(&mut session, ctrl('c')).await, Action::Quit);
}

#[tokio::test]
async fn test_push_and_pop_stash() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('s')).await;
    assert_eq!(session.state().pending.as_ref().unwrap().prompt, PROMPT_PUSH_STASH);
    press(&mut session, key('y')).await;

    let stash = session.state().active[0].stash.clone().expect("item is stashed");
    assert_eq!(press(&mut session, key('s')).await, Action::Bell);

    press(&mut session, key('p')).await;
    assert_eq!(session.state().pending.as_ref().unwrap().prompt, PROMPT_POP_STASH);
    press(&mut session, key('y')).await;

    assert!(session.state().active[0].stash.is_none());
    assert_eq!(fixture.stash.popped.lock().unwrap().as_slice(), [stash.reference]);
}

#[tokio::test]
async fn test_failed_stash_push_keeps_item_unstashed() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    fixture.stash.fail_git.store(true, Ordering::SeqCst);

    press(&mut session, key('s')).await;
    press(&mut session, key('y')).await;

    let state = session.state();
    assert_eq!(state.mode(), Mode::Active);
    assert!(state.active[0].stash.is_none());
    assert_eq!(state.error_message.as_deref(), Some("git stash exited with status 1"));
    assert!(fixture.stash.stashes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_stash_pop_keeps_stash_marker() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    press(&mut session, key('s')).await;
    press(&mut session, key('y')).await;
    let stash = session.state().active[0].stash.clone().expect("item is stashed");

    fixture.stash.fail_git.store(true, Ordering::SeqCst);
    press(&mut session, key('p')).await;
    press(&mut session, key('y')).await;

    let state = session.state();
    assert_eq!(state.active[0].stash.as_ref(), Some(&stash));
    assert_eq!(state.error_message.as_deref(), Some("git stash exited with status 1"));
    assert!(fixture.stash.popped.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_queued_item_keeps_its_stash() {
    let fixture = Fixture::new(&["A"], &["X"]).await;
    let queued = fixture.storage().list_items(fixture.queue_id).await.unwrap()[0].todo_id;
    fixture.stash.stashes.lock().unwrap().insert(
        queued,
        StashRef::from_reference("stash@{Tue Jan 14 19:13:06 2025}"),
    );
    let mut session = fixture.session().await;

    assert_eq!(
        session.state().queue[0].stash.as_ref().map(|s| s.reference.as_str()),
        Some("stash@{Tue Jan 14 19:13:06 2025}")
    );

    press(&mut session, key('j')).await;
    press(&mut session, key('m')).await;

    let state = session.state();
    assert_eq!(tasks(&state.active), vec!["A", "X"]);
    assert!(state.active[1].stash.is_some(), "the stash marker travels back with the item");
}

#[tokio::test]
async fn test_pop_without_stash_does_nothing() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('p')).await;

    assert_eq!(session.state().mode(), Mode::Active);
    assert!(fixture.stash.popped.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_timer_tick_advances_running_timer() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    session.state_mut().timer.running = true;
    session.state_mut().timer.elapsed_seconds = 59;

    session.handle_event(EventType::Tick).await;
    assert_eq!(session.state().timer.elapsed_seconds, 60);

    session.state_mut().timer.running = false;
    session.handle_event(EventType::Tick).await;
    assert_eq!(session.state().timer.elapsed_seconds, 60);
}

#[tokio::test]
async fn test_help_toggle_shrinks_body() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;
    let before = session.state().viewport.body_height;

    press(&mut session, key('?')).await;
    assert!(session.state().help_visible());
    assert_eq!(session.state().viewport.body_height, before - 4);

    press(&mut session, key('h')).await;
    assert_eq!(session.state().viewport.body_height, before);
}

#[tokio::test]
async fn test_resize_updates_viewport() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    session.handle_event(EventType::Resize(100, 30)).await;

    let viewport = session.state().viewport;
    assert_eq!((viewport.width, viewport.height), (100, 30));
    // branch line on top, rule and hint at the bottom
    assert_eq!(viewport.body_height, 27);
}

#[tokio::test]
async fn test_toggle_item_ids() {
    let fixture = Fixture::new(&["A"], &[]).await;
    let mut session = fixture.session().await;

    press(&mut session, key('#')).await;
    assert!(session.state().show_item_ids);
    press(&mut session, key('#')).await;
    assert!(!session.state().show_item_ids);
}
